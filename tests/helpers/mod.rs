//! Shared fixtures: in-memory stores with transaction semantics, a manual
//! clock and an instrumented lock manager.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use ticketd_core::config::ReservationConfig;
use ticketd_core::error::AppError;
use ticketd_core::result::AppResult;
use ticketd_core::traits::{Clock, LockError, LockLease, SeatLockManager};
use ticketd_database::store::{
    ConcertStore, ReservationStore, SeatStore, Transaction, TransactionFactory, ZoneStore,
};
use ticketd_entity::{
    Concert, NewReservation, Reservation, ReservationFilter, ReservationStatus, Seat, SeatStatus,
    UpdateReservation, UpdateSeat, Zone,
};
use ticketd_lock::MemoryLockManager;
use ticketd_service::{ReservationService, ReserveSeatRequest};

pub const HOLD_TTL: Duration = Duration::from_secs(300);

/// Clock the test moves by hand.
#[derive(Debug)]
pub struct ManualClock {
    now: StdMutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: StdMutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::from_std(by).unwrap();
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Committed rows.
#[derive(Debug, Clone, Default)]
pub struct State {
    pub concerts: HashMap<Uuid, Concert>,
    pub zones: HashMap<Uuid, Zone>,
    pub seats: HashMap<Uuid, Seat>,
    pub reservations: Vec<Reservation>,
}

/// In-memory database. A transaction holds the whole state exclusively and
/// works on a copy that only replaces the state on commit.
#[derive(Clone)]
pub struct MemoryDb {
    state: Arc<Mutex<State>>,
    clock: Arc<ManualClock>,
    pub fail_next_commit: Arc<AtomicBool>,
    pub fail_reservation_writes: Arc<AtomicBool>,
    pub commits: Arc<AtomicUsize>,
    pub rollbacks: Arc<AtomicUsize>,
}

impl MemoryDb {
    pub fn new(clock: Arc<ManualClock>) -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
            clock,
            fail_next_commit: Arc::new(AtomicBool::new(false)),
            fail_reservation_writes: Arc::new(AtomicBool::new(false)),
            commits: Arc::new(AtomicUsize::new(0)),
            rollbacks: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn snapshot(&self) -> State {
        self.state.lock().await.clone()
    }

    pub async fn with_state<R>(&self, f: impl FnOnce(&mut State) -> R) -> R {
        let mut state = self.state.lock().await;
        f(&mut state)
    }
}

#[async_trait]
impl ConcertStore for MemoryDb {
    async fn find_one(&self, id: Uuid) -> AppResult<Concert> {
        self.state
            .lock()
            .await
            .concerts
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Concert {id} not found")))
    }
}

#[async_trait]
impl ZoneStore for MemoryDb {
    async fn find_one(&self, id: Uuid) -> AppResult<Zone> {
        self.state
            .lock()
            .await
            .zones
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Zone {id} not found")))
    }
}

#[async_trait]
impl TransactionFactory for MemoryDb {
    async fn begin(&self) -> AppResult<Box<dyn Transaction>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let work = guard.clone();
        Ok(Box::new(MemoryTransaction {
            guard,
            work,
            now: self.clock.now(),
            fail_commit: self.fail_next_commit.swap(false, Ordering::SeqCst),
            fail_reservation_writes: self.fail_reservation_writes.load(Ordering::SeqCst),
            commits: Arc::clone(&self.commits),
            rollbacks: Arc::clone(&self.rollbacks),
        }))
    }
}

pub struct MemoryTransaction {
    guard: OwnedMutexGuard<State>,
    work: State,
    now: DateTime<Utc>,
    fail_commit: bool,
    fail_reservation_writes: bool,
    commits: Arc<AtomicUsize>,
    rollbacks: Arc<AtomicUsize>,
}

#[async_trait]
impl SeatStore for MemoryTransaction {
    async fn find_with_lock(&mut self, id: Uuid) -> AppResult<Seat> {
        self.work
            .seats
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Seat {id} not found")))
    }

    async fn update(&mut self, update: &UpdateSeat) -> AppResult<Seat> {
        if update.is_empty() {
            return Err(AppError::invalid_argument("Seat update has no fields"));
        }
        let seat = self
            .work
            .seats
            .get_mut(&update.id)
            .ok_or_else(|| AppError::not_found(format!("Seat {} not found", update.id)))?;
        update.apply_to(seat, self.now);
        Ok(seat.clone())
    }
}

#[async_trait]
impl ReservationStore for MemoryTransaction {
    async fn find_all(&mut self, filter: &ReservationFilter) -> AppResult<Vec<Reservation>> {
        let mut found: Vec<Reservation> = self
            .work
            .reservations
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.reserved_at.cmp(&a.reserved_at).then(a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn create(&mut self, data: &NewReservation) -> AppResult<Reservation> {
        if self.fail_reservation_writes {
            return Err(AppError::internal("injected reservation write failure"));
        }
        let reservation = Reservation {
            id: Uuid::new_v4(),
            seat_id: data.seat_id,
            session_id: data.session_id.clone(),
            status: data.status,
            reserved_at: data.reserved_at,
            expires_at: data.expires_at,
            created_at: self.now,
            updated_at: self.now,
        };
        self.work.reservations.push(reservation.clone());
        Ok(reservation)
    }

    async fn update(&mut self, update: &UpdateReservation) -> AppResult<Reservation> {
        if update.is_empty() {
            return Err(AppError::invalid_argument("Reservation update has no fields"));
        }
        if self.fail_reservation_writes {
            return Err(AppError::internal("injected reservation write failure"));
        }
        let reservation = self
            .work
            .reservations
            .iter_mut()
            .find(|r| r.id == update.id)
            .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", update.id)))?;
        update.apply_to(reservation, self.now);
        Ok(reservation.clone())
    }
}

#[async_trait]
impl Transaction for MemoryTransaction {
    fn seats(&mut self) -> &mut dyn SeatStore {
        self
    }

    fn reservations(&mut self) -> &mut dyn ReservationStore {
        self
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let mut this = *self;
        if this.fail_commit {
            return Err(AppError::internal("injected commit failure"));
        }
        *this.guard = this.work;
        this.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        self.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// [`MemoryLockManager`] that counts calls and can be told to fail.
#[derive(Debug, Default)]
pub struct RecordingLocks {
    pub inner: MemoryLockManager,
    pub acquires: AtomicUsize,
    pub releases: AtomicUsize,
    pub fail_acquire: AtomicBool,
}

impl RecordingLocks {
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SeatLockManager for RecordingLocks {
    async fn acquire(&self, key: &str, ttl: Duration, token: &str) -> Result<LockLease, LockError> {
        self.acquires.fetch_add(1, Ordering::SeqCst);
        if self.fail_acquire.load(Ordering::SeqCst) {
            return Err(LockError::Backend("injected backend failure".to_string()));
        }
        self.inner.acquire(key, ttl, token).await
    }

    async fn release(&self, key: &str, token: &str) -> Result<(), LockError> {
        self.releases.fetch_add(1, Ordering::SeqCst);
        self.inner.release(key, token).await
    }
}

/// Seeded rows for one reservable seat.
#[derive(Debug, Clone)]
pub struct Fixture {
    pub concert: Concert,
    pub zone: Zone,
    pub seat: Seat,
}

/// Service wired to in-memory backends.
pub struct TestEnv {
    pub db: MemoryDb,
    pub clock: Arc<ManualClock>,
    pub locks: Arc<RecordingLocks>,
    pub service: ReservationService,
}

impl TestEnv {
    pub fn new() -> Self {
        let start = Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap();
        let clock = Arc::new(ManualClock::new(start));
        let db = MemoryDb::new(Arc::clone(&clock));
        let locks = Arc::new(RecordingLocks::default());
        let config = ReservationConfig {
            seat_hold_ttl_seconds: HOLD_TTL.as_secs(),
        };
        let service = ReservationService::new(
            &config,
            Arc::new(db.clone()),
            Arc::new(db.clone()),
            Arc::new(db.clone()),
            locks.clone(),
            clock.clone(),
        );
        Self {
            db,
            clock,
            locks,
            service,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Move both the service clock and the lock TTL clock. Requires a
    /// paused Tokio runtime.
    pub async fn advance(&self, by: Duration) {
        self.clock.advance(by);
        tokio::time::advance(by).await;
    }

    pub async fn seed_concert(&self, date: DateTime<Utc>) -> Concert {
        let now = self.now();
        let concert = Concert {
            id: Uuid::new_v4(),
            name: "Midnight Orchestra".to_string(),
            venue: "Hall A".to_string(),
            date,
            created_at: now,
            updated_at: now,
        };
        self.db
            .with_state(|s| s.concerts.insert(concert.id, concert.clone()))
            .await;
        concert
    }

    pub async fn seed_zone(&self, concert_id: Uuid) -> Zone {
        let now = self.now();
        let zone = Zone {
            id: Uuid::new_v4(),
            concert_id,
            name: "Floor".to_string(),
            description: None,
            created_at: now,
            updated_at: now,
        };
        self.db
            .with_state(|s| s.zones.insert(zone.id, zone.clone()))
            .await;
        zone
    }

    pub async fn seed_seat(&self, zone_id: Uuid, number: &str, status: SeatStatus) -> Seat {
        let now = self.now();
        let seat = Seat {
            id: Uuid::new_v4(),
            zone_id,
            seat_number: number.to_string(),
            status,
            locked_until: None,
            locked_by_session_id: None,
            created_at: now,
            updated_at: now,
        };
        self.db
            .with_state(|s| s.seats.insert(seat.id, seat.clone()))
            .await;
        seat
    }

    /// A future concert with one zone and one available seat.
    pub async fn fixture(&self) -> Fixture {
        let concert = self.seed_concert(self.now() + chrono::Duration::days(30)).await;
        let zone = self.seed_zone(concert.id).await;
        let seat = self.seed_seat(zone.id, "A1", SeatStatus::Available).await;
        Fixture {
            concert,
            zone,
            seat,
        }
    }

    pub async fn seat(&self, id: Uuid) -> Seat {
        self.db.snapshot().await.seats[&id].clone()
    }

    pub async fn reservations_for(&self, seat_id: Uuid) -> Vec<Reservation> {
        self.db
            .snapshot()
            .await
            .reservations
            .into_iter()
            .filter(|r| r.seat_id == seat_id)
            .collect()
    }

    pub async fn payable_for(&self, seat_id: Uuid, session_id: &str) -> Vec<Reservation> {
        let now = self.now();
        self.reservations_for(seat_id)
            .await
            .into_iter()
            .filter(|r| r.session_id == session_id && r.can_pay(now))
            .collect()
    }

    pub async fn lock_holder(&self, fixture: &Fixture) -> Option<String> {
        self.locks.inner.holder(&fixture.lock_key()).await
    }

    pub async fn reserve(&self, fixture: &Fixture, session_id: &str) -> AppResult<Reservation> {
        self.service.reserve_seat(&fixture.request(session_id)).await
    }
}

impl Fixture {
    pub fn request(&self, session_id: &str) -> ReserveSeatRequest {
        ReserveSeatRequest::new(
            self.concert.id.to_string(),
            self.zone.id.to_string(),
            self.seat.id.to_string(),
            session_id,
        )
    }

    pub fn lock_key(&self) -> String {
        ticketd_lock::seat_lock_key(
            &self.concert.id.to_string(),
            &self.zone.id.to_string(),
            &self.seat.id.to_string(),
        )
    }
}

/// Pending reservation row inserted directly, bypassing the service.
pub fn pending_reservation(
    seat_id: Uuid,
    session_id: &str,
    reserved_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
) -> Reservation {
    Reservation {
        id: Uuid::new_v4(),
        seat_id,
        session_id: session_id.to_string(),
        status: ReservationStatus::Pending,
        reserved_at,
        expires_at,
        created_at: reserved_at,
        updated_at: reserved_at,
    }
}
