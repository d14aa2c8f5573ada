use chanlint_ast::nodes::{AstNode, Communication, Misc, Position, SelectClause, SelectStatement};
use chanlint_type_checker::typed_context::TypedContext;
use rustc_hash::FxHashSet;

use crate::classifier::is_timeout_receive;

/// What a single `select` clause contributes to its statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClauseKind {
    Send,
    ExplicitDefault,
    TimeoutReceive,
    OtherReceive,
}

impl ClauseKind {
    #[must_use]
    pub fn is_fallback(self) -> bool {
        matches!(self, ClauseKind::ExplicitDefault | ClauseKind::TimeoutReceive)
    }
}

/// Outcome of analysing one `select` statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectSummary {
    pub send_found: bool,
    pub fallback_found: bool,
    pub send_positions: FxHashSet<Position>,
}

impl SelectSummary {
    /// A guarded `select` cannot block on any of its sends.
    #[must_use]
    pub fn is_guarded(&self) -> bool {
        self.send_found && self.fallback_found
    }
}

#[must_use]
pub fn classify_clause(ctx: &TypedContext, clause: &SelectClause) -> ClauseKind {
    match &clause.communication {
        Communication::Send(_) => ClauseKind::Send,
        Communication::Default => ClauseKind::ExplicitDefault,
        Communication::Receive(receive) => {
            if is_timeout_receive(ctx, &receive.right) {
                ClauseKind::TimeoutReceive
            } else {
                ClauseKind::OtherReceive
            }
        }
    }
}

/// Classifies every clause of `select`.
///
/// Children that are not clauses (comments, unparsable cases) are skipped. A
/// single fallback clause guards every send clause of the statement.
#[must_use]
pub fn analyze_select(ctx: &TypedContext, select: &SelectStatement) -> SelectSummary {
    let mut summary = SelectSummary::default();
    for child in &select.clauses {
        let AstNode::Misc(Misc::Clause(clause)) = child else {
            continue;
        };
        match classify_clause(ctx, clause) {
            ClauseKind::Send => {
                summary.send_found = true;
                if let Communication::Send(send) = &clause.communication {
                    summary.send_positions.insert(send.location.position());
                }
            }
            kind if kind.is_fallback() => summary.fallback_found = true,
            _ => {}
        }
    }
    summary
}
