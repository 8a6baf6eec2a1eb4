use crate::battle::{SessionId, SessionStatus};
use crate::character::CharacterId;
use crate::creature::CreatureId;
use schema::{BallKind, SpeciesId};
use std::fmt;

/// Coarse classification of every error the core can return. Calling layers
/// translate these into user-facing messages; the core never returns prose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or unresolvable input; rejected before any mutation
    Validation,
    /// A consumable the operation needs is depleted; rejected before mutation
    ResourceExhausted,
    /// The operation lost a race or repeated a one-shot transition; state unchanged
    Conflict,
    /// A referenced record is missing; the in-progress operation aborts
    NotFound,
    /// The store itself failed
    Store,
}

/// Main error type for the EloDex simulation core
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Error raised while resolving a capture attempt
    Capture(CaptureError),
    /// Error raised by the matchmaking queue
    Matchmaking(MatchmakingError),
    /// Error raised by the battle-session state machine
    Session(SessionError),
    /// Error raised by species-data lookup
    Species(SpeciesError),
    /// Error raised by the backing store
    Store(StoreError),
}

/// Errors related to capture resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// The character has no balls of the requested kind left
    NoBallsLeft { ball: BallKind },
    /// Species data lookup failed
    Species(SpeciesError),
    /// The backing store failed mid-operation
    Store(StoreError),
}

/// Errors related to the matchmaking queue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchmakingError {
    /// The trainer already holds an outstanding ticket
    AlreadyQueued { trainer: CharacterId },
    /// The backing store failed mid-operation
    Store(StoreError),
}

/// Errors related to battle-session lifecycle transitions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// A finish raced an earlier terminal transition; no mutation was applied
    AlreadyFinished { session: SessionId },
    /// Join is only valid while the session is waiting for an opponent
    NotJoinable {
        session: SessionId,
        status: SessionStatus,
    },
    /// Finish is only valid on an active session
    NotActive {
        session: SessionId,
        status: SessionStatus,
    },
    /// The declared winner/loser are not this session's two participants
    InvalidOutcome { session: SessionId },
    /// The session already reached a terminal state
    AlreadyTerminal {
        session: SessionId,
        status: SessionStatus,
    },
    /// The backing store failed mid-operation
    Store(StoreError),
}

/// Errors related to species-data lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeciesError {
    /// The provider has no record for this species id
    UnknownSpecies(SpeciesId),
    /// Species data is malformed or incomplete
    MalformedData(String),
}

/// Errors raised by the backing store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A lock guarding the store was poisoned by a panicking writer
    LockPoisoned,
    /// No character record under this id
    CharacterNotFound(CharacterId),
    /// No session record under this id
    SessionNotFound(SessionId),
    /// No creature record under this id
    CreatureNotFound(CreatureId),
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Capture(err) => err.kind(),
            CoreError::Matchmaking(err) => err.kind(),
            CoreError::Session(err) => err.kind(),
            CoreError::Species(err) => err.kind(),
            CoreError::Store(err) => err.kind(),
        }
    }
}

impl CaptureError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CaptureError::NoBallsLeft { .. } => ErrorKind::ResourceExhausted,
            CaptureError::Species(err) => err.kind(),
            CaptureError::Store(err) => err.kind(),
        }
    }
}

impl MatchmakingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MatchmakingError::AlreadyQueued { .. } => ErrorKind::Conflict,
            MatchmakingError::Store(err) => err.kind(),
        }
    }
}

impl SessionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SessionError::AlreadyFinished { .. } => ErrorKind::Conflict,
            SessionError::NotJoinable { .. } => ErrorKind::Conflict,
            SessionError::NotActive { .. } => ErrorKind::Conflict,
            SessionError::InvalidOutcome { .. } => ErrorKind::Validation,
            SessionError::AlreadyTerminal { .. } => ErrorKind::Conflict,
            SessionError::Store(err) => err.kind(),
        }
    }
}

impl SpeciesError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SpeciesError::UnknownSpecies(_) => ErrorKind::Validation,
            SpeciesError::MalformedData(_) => ErrorKind::Validation,
        }
    }
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::LockPoisoned => ErrorKind::Store,
            StoreError::CharacterNotFound(_) => ErrorKind::NotFound,
            StoreError::SessionNotFound(_) => ErrorKind::NotFound,
            StoreError::CreatureNotFound(_) => ErrorKind::NotFound,
        }
    }
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::Capture(err) => write!(f, "Capture error: {}", err),
            CoreError::Matchmaking(err) => write!(f, "Matchmaking error: {}", err),
            CoreError::Session(err) => write!(f, "Session error: {}", err),
            CoreError::Species(err) => write!(f, "Species data error: {}", err),
            CoreError::Store(err) => write!(f, "Store error: {}", err),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureError::NoBallsLeft { ball } => write!(f, "No {} left in inventory", ball),
            CaptureError::Species(err) => write!(f, "{}", err),
            CaptureError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl fmt::Display for MatchmakingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchmakingError::AlreadyQueued { trainer } => {
                write!(f, "Trainer {} already holds a matchmaking ticket", trainer)
            }
            MatchmakingError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::AlreadyFinished { session } => {
                write!(f, "Session {} is already finished", session)
            }
            SessionError::NotJoinable { session, status } => {
                write!(f, "Session {} cannot be joined while {:?}", session, status)
            }
            SessionError::NotActive { session, status } => {
                write!(f, "Session {} is {:?}, not active", session, status)
            }
            SessionError::InvalidOutcome { session } => {
                write!(f, "Outcome for session {} does not name its participants", session)
            }
            SessionError::AlreadyTerminal { session, status } => {
                write!(f, "Session {} already ended as {:?}", session, status)
            }
            SessionError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl fmt::Display for SpeciesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeciesError::UnknownSpecies(id) => write!(f, "Species not found: {}", id),
            SpeciesError::MalformedData(details) => write!(f, "Malformed species data: {}", details),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LockPoisoned => write!(f, "Store lock poisoned"),
            StoreError::CharacterNotFound(id) => write!(f, "Character not found: {}", id),
            StoreError::SessionNotFound(id) => write!(f, "Session not found: {}", id),
            StoreError::CreatureNotFound(id) => write!(f, "Creature not found: {}", id),
        }
    }
}

impl std::error::Error for CoreError {}
impl std::error::Error for CaptureError {}
impl std::error::Error for MatchmakingError {}
impl std::error::Error for SessionError {}
impl std::error::Error for SpeciesError {}
impl std::error::Error for StoreError {}

impl From<CaptureError> for CoreError {
    fn from(err: CaptureError) -> Self {
        CoreError::Capture(err)
    }
}

impl From<MatchmakingError> for CoreError {
    fn from(err: MatchmakingError) -> Self {
        CoreError::Matchmaking(err)
    }
}

impl From<SessionError> for CoreError {
    fn from(err: SessionError) -> Self {
        CoreError::Session(err)
    }
}

impl From<SpeciesError> for CoreError {
    fn from(err: SpeciesError) -> Self {
        CoreError::Species(err)
    }
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        CoreError::Store(err)
    }
}

impl From<SpeciesError> for CaptureError {
    fn from(err: SpeciesError) -> Self {
        CaptureError::Species(err)
    }
}

impl From<StoreError> for CaptureError {
    fn from(err: StoreError) -> Self {
        CaptureError::Store(err)
    }
}

impl From<StoreError> for MatchmakingError {
    fn from(err: StoreError) -> Self {
        MatchmakingError::Store(err)
    }
}

impl From<StoreError> for SessionError {
    fn from(err: StoreError) -> Self {
        SessionError::Store(err)
    }
}

/// Type alias for Results using CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Type alias for Results using CaptureError
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Type alias for Results using MatchmakingError
pub type MatchmakingResult<T> = Result<T, MatchmakingError>;

/// Type alias for Results using SessionError
pub type SessionResult<T> = Result<T, SessionError>;

/// Type alias for Results using SpeciesError
pub type SpeciesResult<T> = Result<T, SpeciesError>;

/// Type alias for Results using StoreError
pub type StoreResult<T> = Result<T, StoreError>;
