#[cfg(all(feature = "log", not(feature = "defmt")))]
macro_rules! cdc_log {
    (trace, $($arg:expr),*) => { log::trace!($($arg),*) };
    (debug, $($arg:expr),*) => { log::debug!($($arg),*) };
}

#[cfg(feature = "defmt")]
macro_rules! cdc_log {
    (trace, $($arg:expr),*) => { defmt::trace!($($arg),*) };
    (debug, $($arg:expr),*) => { defmt::debug!($($arg),*) };
}

#[cfg(not(any(feature = "log", feature = "defmt")))]
macro_rules! cdc_log {
    ($level:ident, $($arg:expr),*) => {{ $( let _ = $arg; )* }}
}

macro_rules! cdc_trace {
    ($($arg:expr),*) => (cdc_log!(trace, $($arg),*));
}

macro_rules! cdc_debug {
    ($($arg:expr),*) => (cdc_log!(debug, $($arg),*));
}
