pub mod completions;
pub mod config;
pub mod events;
pub mod locate;
pub mod watch;

/// Runtime for the commands that touch the network or tick.
pub(crate) fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
}
