#[cfg(feature = "log")]
use log::LevelFilter;

mod functional;

fn init_logger() {
    #[cfg(feature = "log")]
    let _ = env_logger::builder()
        .filter_level(LevelFilter::Error)
        .filter(Some("s25fl"), LevelFilter::Trace)
        .is_test(true)
        .try_init();
}
