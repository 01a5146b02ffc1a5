//! Startup lockdown: disable every accessibility and input convenience the
//! kiosk must not expose. Individual toggle failures are logged and
//! swallowed — a feature the platform does not ship cannot be disabled and
//! must not block startup.

use tracing::{debug, info};

use kiosk_platform::{AccessibilityFeature, AccessibilityFeatures};

pub fn apply_lockdown(features: &dyn AccessibilityFeatures) {
    if let Err(e) = features.restrict_virtual_keyboard() {
        debug!(error = %e, "virtual keyboard restriction unavailable");
    }

    for feature in AccessibilityFeature::LOCKDOWN_SET {
        if let Err(e) = features.set_enabled(*feature, false) {
            debug!(feature = ?feature, error = %e, "feature toggle unavailable");
        }
    }
    info!("accessibility lockdown applied");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use kiosk_common::PlatformError;

    #[derive(Default)]
    struct RecordingFeatures {
        disabled: Mutex<Vec<AccessibilityFeature>>,
        keyboard_restricted: Mutex<bool>,
        failing: Option<AccessibilityFeature>,
    }

    impl AccessibilityFeatures for RecordingFeatures {
        fn set_enabled(
            &self,
            feature: AccessibilityFeature,
            enabled: bool,
        ) -> Result<(), PlatformError> {
            if self.failing == Some(feature) {
                return Err(PlatformError::AccessibilityError("unavailable".into()));
            }
            assert!(!enabled, "lockdown must only disable features");
            self.disabled.lock().unwrap().push(feature);
            Ok(())
        }

        fn restrict_virtual_keyboard(&self) -> Result<(), PlatformError> {
            *self.keyboard_restricted.lock().unwrap() = true;
            Ok(())
        }
    }

    #[test]
    fn lockdown_disables_every_feature() {
        let features = RecordingFeatures::default();
        apply_lockdown(&features);

        let disabled = features.disabled.lock().unwrap();
        assert_eq!(disabled.len(), AccessibilityFeature::LOCKDOWN_SET.len());
        assert!(*features.keyboard_restricted.lock().unwrap());
    }

    #[test]
    fn lockdown_survives_a_failing_toggle() {
        let features = RecordingFeatures {
            failing: Some(AccessibilityFeature::HighContrast),
            ..Default::default()
        };
        apply_lockdown(&features);

        // The failing toggle is skipped, the rest still apply.
        let disabled = features.disabled.lock().unwrap();
        assert_eq!(
            disabled.len(),
            AccessibilityFeature::LOCKDOWN_SET.len() - 1
        );
        assert!(!disabled.contains(&AccessibilityFeature::HighContrast));
    }
}
