//! Scripted in-memory driver.
//!
//! `MockDriver` implements [`Driver`] against a table of visible elements.
//! Clicks and fills can fire triggers that show or hide other elements,
//! which is enough to replay a whole page flow without a browser. Every
//! interaction is recorded for later assertion, and pauses advance a
//! virtual clock instead of sleeping.
//!
//! # Example
//!
//! ```
//! use hrflow::driver::{Driver, Effect, Locator, MockDriver};
//!
//! let save = Locator::has_text("button", "Save");
//! let toast = Locator::css("div.oxd-toast");
//!
//! let mut driver = MockDriver::new();
//! driver.show(save.clone(), 1);
//! driver.on_click(save.clone(), vec![Effect::show(toast.clone(), 1)]);
//!
//! driver.click(&save.first()).unwrap();
//! assert!(driver.is_visible(&toast.first()).unwrap());
//! ```

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use super::{Driver, DriverError, DriverResult, Key, Locator, Target};

/// PNG file signature, returned as the body of every mock screenshot.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

/// A change to the page caused by an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Make the locator match one element per text.
    Show { locator: Locator, texts: Vec<String> },
    /// Remove every match of the locator.
    Hide(Locator),
}

impl Effect {
    /// Show `count` elements with empty text.
    pub fn show(locator: Locator, count: usize) -> Self {
        Effect::Show {
            locator,
            texts: vec![String::new(); count],
        }
    }

    /// Show one element per text.
    pub fn show_texts(locator: Locator, texts: &[&str]) -> Self {
        Effect::Show {
            locator,
            texts: texts.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn hide(locator: Locator) -> Self {
        Effect::Hide(locator)
    }
}

/// An interaction recorded by [`MockDriver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockAction {
    Navigate(String),
    Click(Target),
    Fill(Target, String),
    PressKey(Key),
    ScriptClick(Target),
    Screenshot,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TriggerKind {
    Click,
    Fill,
}

#[derive(Debug, Clone)]
struct Trigger {
    kind: TriggerKind,
    locator: Locator,
    requires: Vec<(Target, String)>,
    effects: Vec<Effect>,
}

/// Mock driver for testing.
#[derive(Debug, Default)]
pub struct MockDriver {
    elements: HashMap<Locator, Vec<String>>,
    blocked: HashSet<Locator>,
    fields: HashMap<Target, String>,
    triggers: Vec<Trigger>,
    navigation_error: Option<String>,
    actions: Vec<MockAction>,
    elapsed: Duration,
    screenshots: usize,
    closed: bool,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `locator` match `count` elements with empty text.
    pub fn show(&mut self, locator: Locator, count: usize) {
        self.elements.insert(locator, vec![String::new(); count]);
    }

    /// Make `locator` match one element per text.
    pub fn show_texts(&mut self, locator: Locator, texts: &[&str]) {
        self.elements
            .insert(locator, texts.iter().map(|t| t.to_string()).collect());
    }

    /// Remove every match of `locator`.
    pub fn hide(&mut self, locator: &Locator) {
        self.elements.remove(locator);
    }

    /// Keep `locator` invisible regardless of any effect.
    pub fn block(&mut self, locator: Locator) {
        self.blocked.insert(locator);
    }

    /// Apply `effects` whenever any match of `locator` is clicked.
    pub fn on_click(&mut self, locator: Locator, effects: Vec<Effect>) {
        self.on_click_when(locator, Vec::new(), effects);
    }

    /// Apply `effects` on click, but only while each required field holds its value.
    pub fn on_click_when(
        &mut self,
        locator: Locator,
        requires: Vec<(Target, String)>,
        effects: Vec<Effect>,
    ) {
        self.triggers.push(Trigger {
            kind: TriggerKind::Click,
            locator,
            requires,
            effects,
        });
    }

    /// Apply `effects` whenever any match of `locator` is filled with non-empty text.
    pub fn on_fill(&mut self, locator: Locator, effects: Vec<Effect>) {
        self.triggers.push(Trigger {
            kind: TriggerKind::Fill,
            locator,
            requires: Vec::new(),
            effects,
        });
    }

    /// Make every navigation fail with `message`.
    pub fn fail_navigation(&mut self, message: &str) {
        self.navigation_error = Some(message.to_string());
    }

    /// All recorded interactions, in order.
    pub fn actions(&self) -> &[MockAction] {
        &self.actions
    }

    /// Total virtual time spent in [`Driver::pause`].
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of screenshots captured.
    pub fn screenshots_taken(&self) -> usize {
        self.screenshots
    }

    /// Whether [`Driver::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Last value filled into `target`.
    pub fn field_value(&self, target: &Target) -> Option<&str> {
        self.fields.get(target).map(String::as_str)
    }

    /// Whether any match of `locator` was clicked (directly or by script).
    pub fn was_clicked(&self, locator: &Locator) -> bool {
        self.actions.iter().any(|a| match a {
            MockAction::Click(t) | MockAction::ScriptClick(t) => &t.locator == locator,
            _ => false,
        })
    }

    /// Every key sent, in order.
    pub fn keys_pressed(&self) -> Vec<Key> {
        self.actions
            .iter()
            .filter_map(|a| match a {
                MockAction::PressKey(k) => Some(*k),
                _ => None,
            })
            .collect()
    }

    fn ensure_open(&self) -> DriverResult<()> {
        if self.closed {
            Err(DriverError::SessionClosed)
        } else {
            Ok(())
        }
    }

    fn visible(&self, target: &Target) -> bool {
        !self.blocked.contains(&target.locator)
            && self
                .elements
                .get(&target.locator)
                .is_some_and(|texts| target.index < texts.len())
    }

    fn require_visible(&self, target: &Target) -> DriverResult<()> {
        if self.visible(target) {
            Ok(())
        } else {
            Err(DriverError::NoSuchElement(target.to_string()))
        }
    }

    fn fire(&mut self, kind: TriggerKind, locator: &Locator) {
        let effects: Vec<Effect> = self
            .triggers
            .iter()
            .filter(|t| t.kind == kind && &t.locator == locator)
            .filter(|t| {
                t.requires
                    .iter()
                    .all(|(field, value)| self.fields.get(field) == Some(value))
            })
            .flat_map(|t| t.effects.clone())
            .collect();

        for effect in effects {
            match effect {
                Effect::Show { locator, texts } => {
                    self.elements.insert(locator, texts);
                }
                Effect::Hide(locator) => {
                    self.elements.remove(&locator);
                }
            }
        }
    }
}

impl Driver for MockDriver {
    fn navigate(&mut self, url: &str) -> DriverResult<()> {
        self.ensure_open()?;
        self.actions.push(MockAction::Navigate(url.to_string()));
        match &self.navigation_error {
            Some(message) => Err(DriverError::Http(message.clone())),
            None => Ok(()),
        }
    }

    fn count(&mut self, locator: &Locator) -> DriverResult<usize> {
        self.ensure_open()?;
        if self.blocked.contains(locator) {
            return Ok(0);
        }
        Ok(self.elements.get(locator).map_or(0, Vec::len))
    }

    fn is_visible(&mut self, target: &Target) -> DriverResult<bool> {
        self.ensure_open()?;
        Ok(self.visible(target))
    }

    fn click(&mut self, target: &Target) -> DriverResult<()> {
        self.ensure_open()?;
        self.require_visible(target)?;
        self.actions.push(MockAction::Click(target.clone()));
        self.fire(TriggerKind::Click, &target.locator);
        Ok(())
    }

    fn fill(&mut self, target: &Target, text: &str) -> DriverResult<()> {
        self.ensure_open()?;
        self.require_visible(target)?;
        self.actions
            .push(MockAction::Fill(target.clone(), text.to_string()));
        self.fields.insert(target.clone(), text.to_string());
        if !text.is_empty() {
            self.fire(TriggerKind::Fill, &target.locator);
        }
        Ok(())
    }

    fn text(&mut self, target: &Target) -> DriverResult<String> {
        self.ensure_open()?;
        self.require_visible(target)?;
        Ok(self
            .elements
            .get(&target.locator)
            .and_then(|texts| texts.get(target.index))
            .cloned()
            .unwrap_or_default())
    }

    fn press_key(&mut self, key: Key) -> DriverResult<()> {
        self.ensure_open()?;
        self.actions.push(MockAction::PressKey(key));
        Ok(())
    }

    fn script_click(&mut self, target: &Target) -> DriverResult<()> {
        self.ensure_open()?;
        self.require_visible(target)?;
        self.actions.push(MockAction::ScriptClick(target.clone()));
        self.fire(TriggerKind::Click, &target.locator);
        Ok(())
    }

    fn screenshot(&mut self) -> DriverResult<Vec<u8>> {
        self.ensure_open()?;
        self.actions.push(MockAction::Screenshot);
        self.screenshots += 1;
        Ok(PNG_SIGNATURE.to_vec())
    }

    fn pause(&mut self, duration: Duration) {
        self.elapsed += duration;
    }

    fn close(&mut self) -> DriverResult<()> {
        self.ensure_open()?;
        self.actions.push(MockAction::Close);
        self.closed = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Locator {
        Locator::css("input[name='username']")
    }

    #[test]
    fn mock_tracks_visibility_and_counts() {
        let mut driver = MockDriver::new();
        let options = Locator::role("option", Some("listbox"));
        driver.show_texts(options.clone(), &["Admin", "ESS"]);

        assert_eq!(driver.count(&options).unwrap(), 2);
        assert!(driver.is_visible(&options.nth(1)).unwrap());
        assert!(!driver.is_visible(&options.nth(2)).unwrap());
        assert_eq!(driver.text(&options.nth(1)).unwrap(), "ESS");
    }

    #[test]
    fn mock_click_on_missing_element_fails() {
        let mut driver = MockDriver::new();
        let err = driver
            .click(&Locator::has_text("button", "Add").first())
            .unwrap_err();
        assert!(matches!(err, DriverError::NoSuchElement(_)));
        assert!(driver.actions().is_empty());
    }

    #[test]
    fn mock_guarded_trigger_requires_field_values() {
        let mut driver = MockDriver::new();
        let submit = Locator::css("button[type='submit']");
        let admin = Locator::has_text("a", "Admin");
        driver.show(field(), 1);
        driver.show(submit.clone(), 1);
        driver.on_click_when(
            submit.clone(),
            vec![(field().first(), "Admin".to_string())],
            vec![Effect::show(admin.clone(), 1)],
        );

        driver.fill(&field().first(), "nobody").unwrap();
        driver.click(&submit.first()).unwrap();
        assert!(!driver.is_visible(&admin.first()).unwrap());

        driver.fill(&field().first(), "Admin").unwrap();
        driver.click(&submit.first()).unwrap();
        assert!(driver.is_visible(&admin.first()).unwrap());
    }

    #[test]
    fn mock_fill_triggers_skip_empty_text() {
        let mut driver = MockDriver::new();
        let hints = Locator::Placeholder("Type for hints...".into());
        let options = Locator::role("option", Some("listbox"));
        driver.show(hints.clone(), 1);
        driver.on_fill(hints.clone(), vec![Effect::show(options.clone(), 1)]);

        driver.fill(&hints.first(), "").unwrap();
        assert_eq!(driver.count(&options).unwrap(), 0);

        driver.fill(&hints.first(), "a").unwrap();
        assert_eq!(driver.count(&options).unwrap(), 1);
        assert_eq!(driver.field_value(&hints.first()), Some("a"));
    }

    #[test]
    fn mock_blocked_locator_never_shows() {
        let mut driver = MockDriver::new();
        let toast = Locator::css("div.oxd-toast");
        driver.block(toast.clone());
        driver.show(toast.clone(), 1);
        assert!(!driver.is_visible(&toast.first()).unwrap());
        assert_eq!(driver.count(&toast).unwrap(), 0);
    }

    #[test]
    fn mock_hide_effect_removes_elements() {
        let mut driver = MockDriver::new();
        let yes = Locator::has_text("button", "Yes, Delete");
        let row = Locator::Cell("edited_user_abc".into());
        driver.show(yes.clone(), 1);
        driver.show(row.clone(), 1);
        driver.on_click(yes.clone(), vec![Effect::hide(row.clone())]);

        driver.click(&yes.first()).unwrap();
        assert!(!driver.is_visible(&row.first()).unwrap());
        assert!(driver.was_clicked(&yes));
    }

    #[test]
    fn mock_records_keys_and_screenshots() {
        let mut driver = MockDriver::new();
        driver.press_key(Key::ArrowDown).unwrap();
        driver.press_key(Key::Enter).unwrap();
        let png = driver.screenshot().unwrap();

        assert_eq!(driver.keys_pressed(), vec![Key::ArrowDown, Key::Enter]);
        assert_eq!(driver.screenshots_taken(), 1);
        assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn mock_pause_advances_virtual_clock() {
        let mut driver = MockDriver::new();
        driver.pause(Duration::from_millis(800));
        driver.pause(Duration::from_millis(600));
        assert_eq!(driver.elapsed(), Duration::from_millis(1400));
    }

    #[test]
    fn mock_navigation_failure() {
        let mut driver = MockDriver::new();
        driver.fail_navigation("dns error");
        let err = driver.navigate("https://example.test").unwrap_err();
        assert!(err.to_string().contains("dns error"));
        assert_eq!(
            driver.actions(),
            &[MockAction::Navigate("https://example.test".into())]
        );
    }

    #[test]
    fn mock_close_ends_session() {
        let mut driver = MockDriver::new();
        driver.close().unwrap();
        assert!(driver.is_closed());
        assert!(matches!(
            driver.navigate("https://example.test"),
            Err(DriverError::SessionClosed)
        ));
        assert!(matches!(driver.close(), Err(DriverError::SessionClosed)));
    }
}
