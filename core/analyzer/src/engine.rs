//! Single-pass traversal that applies the channel rules to a file.
//!
//! The walk is pre-order: a `select` statement is visited, and its guarded
//! sends merged into the file's [`SafeSendSet`], before any of its clauses.
//! Each send is then checked against the set when the walk reaches it.

use chanlint_ast::nodes::{
    AstNode, Expression, FunctionCallExpression, Location, Position, SelectStatement, SendStatement,
    SourceFile, Statement,
};
use chanlint_type_checker::typed_context::TypedContext;
use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::{
    classifier::{ChannelCreation, is_channel_creation},
    clause::analyze_select,
    diagnostics::{Finding, Reporter, Rule, Severity},
    settings::Settings,
};

/// Positions of sends guarded by a fallback clause, scoped to one file.
#[derive(Debug, Default)]
pub struct SafeSendSet {
    positions: FxHashSet<Position>,
}

impl SafeSendSet {
    /// Adds positions; nothing is ever removed.
    pub fn merge(&mut self, positions: impl IntoIterator<Item = Position>) {
        self.positions.extend(positions);
    }

    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.positions.contains(&position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

pub struct Engine {
    settings: Settings,
    severity: Severity,
}

impl Engine {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            severity: Severity::default(),
        }
    }

    /// Severity attached to every finding.
    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    #[must_use]
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Analyses every source file of the context, each with its own safe set.
    pub fn analyze(&self, ctx: &TypedContext, reporter: &mut impl Reporter) {
        for source_file in ctx.source_files() {
            self.analyze_file(ctx, &source_file, reporter);
        }
    }

    pub fn analyze_file(
        &self,
        ctx: &TypedContext,
        source_file: &SourceFile,
        reporter: &mut impl Reporter,
    ) {
        let mut safe_sends = SafeSendSet::default();
        let mut stack: Vec<AstNode> = source_file.children().into_iter().rev().collect();
        while let Some(node) = stack.pop() {
            self.visit(ctx, &node, &mut safe_sends, reporter);
            stack.extend(node.children().into_iter().rev());
        }
        debug!(
            safe_sends = safe_sends.len(),
            package = source_file.package_name.as_deref().unwrap_or_default(),
            "analysed source file"
        );
    }

    fn visit(
        &self,
        ctx: &TypedContext,
        node: &AstNode,
        safe_sends: &mut SafeSendSet,
        reporter: &mut impl Reporter,
    ) {
        match node {
            AstNode::Statement(Statement::Select(select)) => {
                self.visit_select(ctx, select, safe_sends);
            }
            AstNode::Statement(Statement::Send(send)) => {
                self.visit_send(send, safe_sends, reporter);
            }
            AstNode::Expression(Expression::FunctionCall(call)) => {
                self.visit_call(ctx, call, reporter);
            }
            _ => {}
        }
    }

    fn visit_select(&self, ctx: &TypedContext, select: &SelectStatement, safe_sends: &mut SafeSendSet) {
        if !self.settings.check_blocking_sends {
            return;
        }
        let summary = analyze_select(ctx, select);
        if summary.is_guarded() {
            trace!(
                location = %select.location,
                sends = summary.send_positions.len(),
                "select has a fallback clause"
            );
            safe_sends.merge(summary.send_positions);
        }
    }

    fn visit_send(&self, send: &SendStatement, safe_sends: &SafeSendSet, reporter: &mut impl Reporter) {
        if self.settings.check_blocking_sends && !safe_sends.contains(send.location.position()) {
            self.report(Rule::BlockingSend, &send.location, reporter);
        }
    }

    fn visit_call(&self, ctx: &TypedContext, call: &FunctionCallExpression, reporter: &mut impl Reporter) {
        let Some(creation) = is_channel_creation(ctx, call) else {
            return;
        };
        match creation {
            ChannelCreation::Unbuffered => {
                if self.settings.check_unbuffered_channels {
                    self.report(Rule::UnbufferedChannel, &call.location, reporter);
                }
            }
            ChannelCreation::Buffered { capacity: Ok(capacity) } => {
                let Some(limit) = self.settings.buffer_limit() else {
                    return;
                };
                if capacity == 0 {
                    self.report(Rule::ZeroBuffer, &call.location, reporter);
                } else if capacity > limit {
                    self.report(Rule::BufferLimit, &call.location, reporter);
                }
            }
            ChannelCreation::Buffered { capacity: Err(_) } => {
                trace!(location = %call.location, "channel capacity is not a literal");
            }
        }
    }

    fn report(&self, rule: Rule, location: &Location, reporter: &mut impl Reporter) {
        reporter.report(Finding::new(rule, location, self.severity));
    }
}
