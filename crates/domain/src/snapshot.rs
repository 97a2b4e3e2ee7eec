/// The three observable round-status values reported to clients in a
/// `SNAPSHOT_RSP`. Distinct from `round::RoundStatus`, which only
/// models the two states a `Round` value itself can hold —
/// `NoActiveRound` only makes sense from the outside, when there is no
/// `Round` at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RoundStatusView {
    NoActiveRound = 0,
    Betting = 1,
    AwaitingResults = 2,
}

impl From<crate::round::RoundStatus> for RoundStatusView {
    fn from(status: crate::round::RoundStatus) -> Self {
        match status {
            crate::round::RoundStatus::Betting => RoundStatusView::Betting,
            crate::round::RoundStatus::AwaitingResults => RoundStatusView::AwaitingResults,
        }
    }
}
