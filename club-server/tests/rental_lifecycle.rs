//! Rental lifecycle integration tests
//!
//! Exercises the lease engine end to end over a real (tempdir-backed)
//! SQLite pool: atomic claims, the expiration sweep, and the guarded
//! station mutations.

use club_server::CurrentUser;
use club_server::db::DbService;
use club_server::db::repository::station;
use club_server::rentals::RentalService;
use club_server::utils::AppError;
use shared::models::{Station, StationCreate, StationStatus, UserRole};
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn test_pool() -> (TempDir, SqlitePool) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = dir.path().join("club.db");
    let db = DbService::new(&db_path.to_string_lossy())
        .await
        .expect("Failed to initialize database");
    (dir, db.pool)
}

async fn client(pool: &SqlitePool, login: &str) -> CurrentUser {
    let email = format!("{login}@example.com");
    let user = club_server::db::repository::user::create(
        pool,
        login,
        &email,
        None,
        UserRole::Client,
        "not-a-real-hash",
    )
    .await
    .expect("Failed to create user");
    CurrentUser {
        id: user.id,
        login: user.login,
        role: user.role,
    }
}

async fn add_station(pool: &SqlitePool, name: &str) -> Station {
    station::create(
        pool,
        StationCreate {
            name: name.to_string(),
            configuration: "i5, 16GB, RTX 4060".to_string(),
        },
    )
    .await
    .expect("Failed to create station")
}

/// status == Rented must hold exactly while rental_end_time is set
async fn assert_status_invariant(pool: &SqlitePool) {
    for s in station::find_all(pool).await.unwrap() {
        assert_eq!(
            s.status == StationStatus::Rented,
            s.rental_end_time.is_some(),
            "invariant broken for station '{}'",
            s.name
        );
    }
}

async fn backdate_expiry(pool: &SqlitePool, station_id: i64, millis_ago: i64) {
    let past = shared::util::now_millis() - millis_ago;
    sqlx::query("UPDATE station SET rental_end_time = ? WHERE id = ?")
        .bind(past)
        .bind(station_id)
        .execute(pool)
        .await
        .expect("Failed to backdate expiry");
}

#[tokio::test]
async fn rent_then_sweep_full_cycle() {
    let (_dir, pool) = test_pool().await;
    let service = RentalService::new(pool.clone());
    let user = client(&pool, "alice").await;
    let s = add_station(&pool, "PC1").await;

    let before = shared::util::now_millis();
    let log = service.start_rental(s.id, &user, "10m").await.unwrap();
    let after = shared::util::now_millis();

    assert_eq!(log.end_time - log.start_time, 10 * 60 * 1000);
    assert!(log.start_time >= before && log.start_time <= after);

    let rented = station::find_by_id(&pool, s.id).await.unwrap().unwrap();
    assert_eq!(rented.status, StationStatus::Rented);
    assert_eq!(rented.rental_end_time, Some(log.end_time));
    assert_status_invariant(&pool).await;

    // Lease has not expired yet: the sweep must leave it alone
    assert_eq!(service.sweep().await.unwrap(), 0);
    let still = station::find_by_id(&pool, s.id).await.unwrap().unwrap();
    assert_eq!(still.status, StationStatus::Rented);

    // Move the expiry into the past, as if 11 minutes went by
    backdate_expiry(&pool, s.id, 60 * 1000).await;

    assert_eq!(service.sweep().await.unwrap(), 1);
    let released = station::find_by_id(&pool, s.id).await.unwrap().unwrap();
    assert_eq!(released.status, StationStatus::Available);
    assert_eq!(released.rental_end_time, None);
    assert_status_invariant(&pool).await;

    // The history row is untouched by the sweep
    let log_count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM rental_log WHERE station_id = ?",
    )
    .bind(s.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(log_count, 1);
}

#[tokio::test]
async fn sweep_twice_is_idempotent() {
    let (_dir, pool) = test_pool().await;
    let service = RentalService::new(pool.clone());
    let user = client(&pool, "bob").await;
    let s1 = add_station(&pool, "PC1").await;
    let s2 = add_station(&pool, "PC2").await;

    service.start_rental(s1.id, &user, "5m").await.unwrap();
    service.start_rental(s2.id, &user, "5m").await.unwrap();
    backdate_expiry(&pool, s1.id, 1000).await;
    backdate_expiry(&pool, s2.id, 1000).await;

    assert_eq!(service.sweep().await.unwrap(), 2);
    let after_first: Vec<_> = station::find_all(&pool).await.unwrap();

    // Second sweep with no new leases: same final state, nothing reclaimed
    assert_eq!(service.sweep().await.unwrap(), 0);
    let after_second: Vec<_> = station::find_all(&pool).await.unwrap();

    for (a, b) in after_first.iter().zip(after_second.iter()) {
        assert_eq!(a.status, b.status);
        assert_eq!(a.rental_end_time, b.rental_end_time);
    }
    assert_status_invariant(&pool).await;
}

#[tokio::test]
async fn concurrent_rent_exactly_one_wins() {
    let (_dir, pool) = test_pool().await;
    let service = RentalService::new(pool.clone());
    let alice = client(&pool, "alice").await;
    let bob = client(&pool, "bob").await;
    let s = add_station(&pool, "PC1").await;

    let (a, b) = tokio::join!(
        service.start_rental(s.id, &alice, "30m"),
        service.start_rental(s.id, &bob, "30m"),
    );

    let outcomes = [a, b];
    let wins = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1, "exactly one concurrent claim must succeed");

    let loss = outcomes.iter().find(|r| r.is_err()).unwrap();
    assert!(matches!(loss, Err(AppError::InvalidState(_))));

    // Exactly one history row was appended
    let log_count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM rental_log WHERE station_id = ?")
            .bind(s.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(log_count, 1);
    assert_status_invariant(&pool).await;
}

#[tokio::test]
async fn rent_rejects_wrong_targets() {
    let (_dir, pool) = test_pool().await;
    let service = RentalService::new(pool.clone());
    let user = client(&pool, "alice").await;
    let s = add_station(&pool, "PC1").await;

    // Unknown station
    let err = service.start_rental(999, &user, "10m").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    // Already rented
    service.start_rental(s.id, &user, "10m").await.unwrap();
    let err = service.start_rental(s.id, &user, "10m").await.unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)));
}

#[tokio::test]
async fn bad_duration_leaves_station_untouched() {
    let (_dir, pool) = test_pool().await;
    let service = RentalService::new(pool.clone());
    let user = client(&pool, "alice").await;
    let s = add_station(&pool, "PC1").await;

    for token in ["10x", "0m", "-2h", "", "h"] {
        let err = service.start_rental(s.id, &user, token).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "token '{token}'");
    }

    let untouched = station::find_by_id(&pool, s.id).await.unwrap().unwrap();
    assert_eq!(untouched.status, StationStatus::Available);
    assert_eq!(untouched.rental_end_time, None);
}

#[tokio::test]
async fn rented_station_rejects_reconfiguration_and_retirement() {
    let (_dir, pool) = test_pool().await;
    let service = RentalService::new(pool.clone());
    let user = client(&pool, "alice").await;
    let s = add_station(&pool, "PC1").await;

    service.start_rental(s.id, &user, "1h").await.unwrap();

    let err = station::update_configuration(&pool, s.id, "i9, 64GB")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        club_server::db::repository::RepoError::InvalidState(_)
    ));

    let err = station::retire(&pool, s.id).await.unwrap_err();
    assert!(matches!(
        err,
        club_server::db::repository::RepoError::InvalidState(_)
    ));

    // Once the lease is reclaimed both operations go through
    backdate_expiry(&pool, s.id, 1000).await;
    service.sweep().await.unwrap();

    let updated = station::update_configuration(&pool, s.id, "i9, 64GB")
        .await
        .unwrap();
    assert_eq!(updated.configuration, "i9, 64GB");

    assert!(station::retire(&pool, s.id).await.unwrap());
    assert!(station::find_all(&pool).await.unwrap().is_empty());

    // Retired units no longer rent, but their rows and history remain
    let err = service.start_rental(s.id, &user, "10m").await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    let retired = station::find_by_id(&pool, s.id).await.unwrap().unwrap();
    assert!(!retired.is_active);
}

#[tokio::test]
async fn available_or_mine_shows_held_lease_only() {
    let (_dir, pool) = test_pool().await;
    let service = RentalService::new(pool.clone());
    let alice = client(&pool, "alice").await;
    let bob = client(&pool, "bob").await;
    let s1 = add_station(&pool, "PC1").await;
    let s2 = add_station(&pool, "PC2").await;

    // No lease: the whole free pool
    let pool_view = service.list_available_or_mine(&alice).await.unwrap();
    assert_eq!(pool_view.len(), 2);

    service.start_rental(s1.id, &alice, "30m").await.unwrap();

    // Holder sees only their own unit
    let mine = service.list_available_or_mine(&alice).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, s1.id);

    // Everyone else sees the remaining pool
    let others = service.list_available_or_mine(&bob).await.unwrap();
    assert_eq!(others.len(), 1);
    assert_eq!(others[0].id, s2.id);

    // After the sweep reclaims the lease the pool is whole again
    backdate_expiry(&pool, s1.id, 1000).await;
    service.sweep().await.unwrap();
    let pool_view = service.list_available_or_mine(&alice).await.unwrap();
    assert_eq!(pool_view.len(), 2);
}

#[tokio::test]
async fn duplicate_station_name_conflicts() {
    let (_dir, pool) = test_pool().await;
    add_station(&pool, "PC1").await;

    let err = station::create(
        &pool,
        StationCreate {
            name: "PC1".to_string(),
            configuration: String::new(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(
        err,
        club_server::db::repository::RepoError::Duplicate(_)
    ));
}
