//! Foreground window inspection.
//!
//! Parsing is a pure function over the raw window dump so it can be
//! tested against canned fixtures, independent of the transport.

use tracing::{debug, error, info};

use adbfleet_transport::Transport;

/// Marker on the window-dump line naming the focused window.
const FOCUS_MARKER: &str = "mCurrentFocus";

/// Extract the focused package from `dumpsys window windows` output.
///
/// The focused line looks like:
///
/// ```text
///   mCurrentFocus=Window{1a2b3c4 u0 com.example.app/com.example.app.MainActivity}
/// ```
///
/// The package is whatever precedes `/` in the last whitespace token of
/// the first marker line. Returns `None` when the marker is absent.
pub fn parse_focused_app(dump: &str) -> Option<String> {
    for line in dump.lines() {
        if !line.contains(FOCUS_MARKER) {
            continue;
        }
        let token = line.split_whitespace().last()?;
        let package = token.split('/').next().unwrap_or(token);
        return Some(package.to_string());
    }
    None
}

/// Query a device for its foreground application package.
///
/// Command failures and missing markers are logged and yield `None`.
pub async fn focused_app<T: Transport>(transport: &T, address: &str) -> Option<String> {
    match transport
        .run(address, &["shell", "dumpsys", "window", "windows"])
        .await
    {
        Ok(dump) => match parse_focused_app(&dump) {
            Some(package) => {
                info!(%address, %package, "focused app");
                Some(package)
            }
            None => {
                error!(%address, "unable to determine the focused app");
                None
            }
        },
        Err(e) => {
            error!(%address, error = %e, "failed to retrieve window information");
            None
        }
    }
}

/// Whether any process matching `pattern` is running on the device.
///
/// Aliveness is "the search returned output": `pgrep` exits non-zero on
/// no match, which lands in the error arm and reads as not alive.
pub async fn process_alive<T: Transport>(transport: &T, address: &str, pattern: &str) -> bool {
    match transport
        .run(address, &["shell", "pgrep", "-f", pattern])
        .await
    {
        Ok(out) => !out.trim().is_empty(),
        Err(e) => {
            debug!(%address, %pattern, error = %e, "process search returned nothing");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW_DUMP: &str = r#"WINDOW MANAGER WINDOWS (dumpsys window windows)
  Window #0 Window{41dbd23 u0 com.android.systemui.ImageWallpaper}:
    mDisplayId=0 rootTaskId=1 mSession=Session{2d4a651 1291:u0a10043}
  Window #1 Window{8f21b44 u0 com.nianticlabs.pokemongo/com.nianticlabs.pokemongo.MainActivity}:
    mDisplayId=0 rootTaskId=12 mSession=Session{9cc7e12 4512:u0a10144}
  mGlobalConfiguration={1.0 310mcc260mnc [en_US] ldltr sw320dp}
  mCurrentFocus=Window{8f21b44 u0 com.nianticlabs.pokemongo/com.nianticlabs.pokemongo.MainActivity}
  mFocusedApp=ActivityRecord{7e3a1f u0 com.nianticlabs.pokemongo/.MainActivity t12}
"#;

    #[test]
    fn extracts_package_from_focus_line() {
        assert_eq!(
            parse_focused_app(WINDOW_DUMP),
            Some("com.nianticlabs.pokemongo".to_string())
        );
    }

    #[test]
    fn extracts_other_foreground_package() {
        let dump = "  mCurrentFocus=Window{abc123 u0 com.other.app/com.other.app.HomeActivity}\n";
        assert_eq!(parse_focused_app(dump), Some("com.other.app".to_string()));
    }

    #[test]
    fn missing_marker_yields_none() {
        let dump = "WINDOW MANAGER WINDOWS\n  mFocusedApp=ActivityRecord{...}\n";
        assert_eq!(parse_focused_app(dump), None);
    }

    #[test]
    fn empty_dump_yields_none() {
        assert_eq!(parse_focused_app(""), None);
    }

    #[test]
    fn first_marker_line_wins() {
        let dump = "mCurrentFocus=Window{a u0 com.first.app/.Main}\n\
                    mCurrentFocus=Window{b u0 com.second.app/.Main}\n";
        assert_eq!(parse_focused_app(dump), Some("com.first.app".to_string()));
    }
}
