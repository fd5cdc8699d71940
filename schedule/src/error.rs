use snafu::Snafu;

pub type Result<T, E = ScheduleError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Snafu)]
#[snafu(visibility(pub))]
pub enum ScheduleError {
    /// The engine reported a contract violation or usage error.
    #[snafu(context(false), display("rewrite failed: {source}"))]
    Rewrite { source: graft_ir::Error },

    #[snafu(display("no fixpoint after {passes} passes, the last one still performed {rewrites} rewrites"))]
    FixpointNotReached { passes: usize, rewrites: usize },
}
