use kiosk_common::PlatformError;

/// The accessibility features the kiosk lockdown touches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessibilityFeature {
    LargeCursor,
    StickyKeys,
    HighContrast,
    ScreenMagnifier,
    Autoclick,
    VirtualKeyboard,
    /// Enabled = platform default animation policy, disabled = none.
    Animation,
    SpokenFeedback,
}

impl AccessibilityFeature {
    /// Every feature the startup lockdown disables, in toggle order.
    pub const LOCKDOWN_SET: &'static [AccessibilityFeature] = &[
        AccessibilityFeature::LargeCursor,
        AccessibilityFeature::StickyKeys,
        AccessibilityFeature::HighContrast,
        AccessibilityFeature::ScreenMagnifier,
        AccessibilityFeature::Autoclick,
        AccessibilityFeature::VirtualKeyboard,
        AccessibilityFeature::Animation,
        AccessibilityFeature::SpokenFeedback,
    ];
}

/// Accessibility feature toggles plus the virtual-keyboard restrictions
/// (auto-complete, auto-correct, spell-check, voice input, handwriting).
pub trait AccessibilityFeatures: Send + Sync {
    fn set_enabled(&self, feature: AccessibilityFeature, enabled: bool)
        -> Result<(), PlatformError>;

    fn restrict_virtual_keyboard(&self) -> Result<(), PlatformError>;
}
