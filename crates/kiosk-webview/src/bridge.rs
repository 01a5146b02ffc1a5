//! The JS bridge between the hosted page and the native host.
//!
//! Messages flow in both directions:
//! - **Page -> host**: the page calls `window.postMessage({type: "CHROME
//!   COMMAND", ...})`; the bridge forwards the stringified payload to the
//!   native side through `window.ipc.postMessage`.
//! - **Host -> page**: the host evaluates a script that posts the
//!   `CHROME RESPONSE` envelope back onto the page's window.

use kiosk_protocol::ResponseEnvelope;

/// Class appended to `document.body` so the hosted page can detect it is
/// running inside the secure shell.
pub const WELCOME_MARKER_CLASS: &str = "browser_airsecurebrowser";

/// Injected into every page before its own scripts run. Listens on the
/// window message channel and forwards command envelopes to the host;
/// everything else on the channel stays untouched.
pub const BRIDGE_INIT_SCRIPT: &str = r#"
(function() {
    window.addEventListener('message', function(event) {
        var data = event.data;
        if (data && data.type === 'CHROME COMMAND') {
            window.ipc.postMessage(JSON.stringify(data));
        }
    });
})();
"#;

/// Script that delivers one response envelope to the page.
pub fn post_response_script(envelope: &ResponseEnvelope) -> String {
    let payload = serde_json::to_string(envelope).unwrap_or_else(|_| "null".to_string());
    format!("window.postMessage({payload}, '*');")
}

/// Script run once the page has loaded: tags the body with the shell marker
/// class and announces the shell with an `APP WELCOME` envelope.
pub fn welcome_script(welcome: &ResponseEnvelope) -> String {
    format!(
        r#"(function(domNode, classToAdd) {{
    if ((domNode.className).indexOf(classToAdd) < 0) {{
        domNode.className += (' ' + classToAdd);
    }}
}})(document.body, '{WELCOME_MARKER_CLASS}');
{}"#,
        post_response_script(welcome)
    )
}
