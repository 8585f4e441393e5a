//! Entity models shared between the server and its clients.

pub mod menu_item;
pub mod order;
pub mod rental;
pub mod station;
pub mod user;

pub use menu_item::{MenuItem, MenuItemCreate, MenuItemPriceUpdate};
pub use order::{Order, OrderCreate, OrderDetail, OrderItemDetail, OrderItemInput, OrderStatus};
pub use rental::RentalLog;
pub use station::{Station, StationConfigUpdate, StationCreate, StationStatus};
pub use user::{ParseRoleError, User, UserRole};
