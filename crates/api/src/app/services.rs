use std::sync::Arc;

use thiserror::Error;

use hostelgate_access::{AccessEvent, Action, LedgerDate, PolicyViolation};
use hostelgate_infra::{
    AccessLedger, AppConfig, Clock, FileLedgerStore, IdentityResolver, InMemoryLedgerStore,
    LedgerError, LedgerStore, NearestEncodingResolver, RecordOutcome, Recorded, SystemClock,
    roster_file,
};
use hostelgate_roster::{FaceEncoding, PersonRecord, Roster};

type SharedLedger = AccessLedger<Arc<dyn LedgerStore>, Arc<dyn Clock>>;
type SharedResolver = Arc<dyn IdentityResolver<Frame = FaceEncoding>>;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("background task failed: {0}")]
    Join(String),
}

/// What happened to one captured frame.
#[derive(Debug, Clone)]
pub enum GateOutcome {
    Unidentified,
    Recorded {
        person: PersonRecord,
        recorded: Recorded,
    },
    Rejected {
        person: PersonRecord,
        violation: PolicyViolation,
    },
}

/// Everything the handlers need, built once at startup.
///
/// The roster and resolver are an immutable snapshot; picking up roster
/// changes means restarting (or building new services) explicitly.
pub struct AppServices {
    ledger: Arc<SharedLedger>,
    resolver: SharedResolver,
    roster: Arc<Roster>,
}

impl AppServices {
    pub fn new(
        store: Arc<dyn LedgerStore>,
        clock: Arc<dyn Clock>,
        roster: Roster,
        match_tolerance: f32,
    ) -> Self {
        let resolver = NearestEncodingResolver::from_roster(&roster, match_tolerance);
        Self {
            ledger: Arc::new(AccessLedger::with_clock(store, clock)),
            resolver: Arc::new(resolver),
            roster: Arc::new(roster),
        }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory(roster: Roster, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            Arc::new(InMemoryLedgerStore::new()),
            clock,
            roster,
            NearestEncodingResolver::DEFAULT_TOLERANCE,
        )
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Resolve the frame, then record the action for whoever it is.
    ///
    /// Ledger work is synchronous and may wait on the day lock, so it runs on
    /// the blocking pool.
    pub async fn recognize(
        &self,
        frame: FaceEncoding,
        action: Action,
    ) -> Result<GateOutcome, ServiceError> {
        let resolver = self.resolver.clone();
        let ledger = self.ledger.clone();

        tokio::task::spawn_blocking(move || -> Result<GateOutcome, ServiceError> {
            let Some(person) = resolver.resolve(&frame) else {
                tracing::info!(action = action.as_str(), "frame did not match any resident");
                return Ok(GateOutcome::Unidentified);
            };

            let outcome = match ledger.record_action(&person, action)? {
                RecordOutcome::Recorded(recorded) => GateOutcome::Recorded { person, recorded },
                RecordOutcome::Rejected(violation) => GateOutcome::Rejected { person, violation },
            };
            Ok(outcome)
        })
        .await
        .map_err(|e| ServiceError::Join(e.to_string()))?
    }

    /// Today's stored rows, in ledger order.
    pub async fn today_records(&self) -> Result<(LedgerDate, Vec<AccessEvent>), ServiceError> {
        let ledger = self.ledger.clone();
        tokio::task::spawn_blocking(move || -> Result<_, ServiceError> {
            let day = ledger.load_today()?;
            Ok((day.date(), day.into_events()))
        })
        .await
        .map_err(|e| ServiceError::Join(e.to_string()))?
    }
}

/// Production wiring: file-backed day ledgers and the on-disk roster
/// (sample roster written if none exists yet).
pub fn build_services(config: &AppConfig) -> anyhow::Result<AppServices> {
    let store = FileLedgerStore::open(&config.record_dir)?;
    let roster = roster_file::load_or_create_sample(&config.roster_file)?;

    tracing::info!(
        record_dir = %config.record_dir.display(),
        residents = roster.len(),
        tolerance = config.match_tolerance,
        "gate services ready"
    );

    Ok(AppServices::new(
        Arc::new(store),
        Arc::new(SystemClock),
        roster,
        config.match_tolerance,
    ))
}
