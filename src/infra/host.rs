//! Host name probe for the hardware-specific skip branch.

use gethostname::gethostname;
use once_cell::sync::Lazy;

static HOST_NAME: Lazy<String> = Lazy::new(|| gethostname().to_string_lossy().into_owned());

/// The machine's hostname, looked up once per process. Empty-ish values are
/// possible on exotic hosts and simply never match the "vm" pattern.
pub fn host_name() -> &'static str {
    &HOST_NAME
}
