//! First-class invariants for the engine state.
//!
//! Invariants are logical properties of a [`Snapshot`](crate::Snapshot) that
//! hold after every transition. They are checked in debug builds before a
//! new state is committed and can be tested independently.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("{}", description)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of two to four invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);

pub mod queue_board_agreement;
pub mod queue_capacity;
pub mod turn_balance;
pub mod winner_consistent;

pub use queue_board_agreement::QueueBoardAgreementInvariant;
pub use queue_capacity::QueueCapacityInvariant;
pub use turn_balance::TurnBalanceInvariant;
pub use winner_consistent::WinnerConsistentInvariant;

/// All engine invariants as a composable set.
pub type OnlyThreeInvariants = (
    QueueCapacityInvariant,
    QueueBoardAgreementInvariant,
    TurnBalanceInvariant,
    WinnerConsistentInvariant,
);
