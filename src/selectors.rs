//! WhatsApp Web selector tables, one [`LocatorSpec`] per role
//!
//! These track the markup of the live application and are expected to drift;
//! the order inside each list is the order they are tried.

use std::time::Duration;

use crate::types::{LocatorSpec, Pick, Role, Selector, xpath_literal};

/// Generic editable region used by the structural fallbacks
pub const EDITABLE_REGION: &str = "div[contenteditable='true']";

pub fn app_shell() -> Selector {
    Selector::xpath("//div[@id='pane-side']")
}

pub fn search_box(per_attempt: Duration) -> LocatorSpec {
    LocatorSpec::new(
        Role::SearchBox,
        vec![
            Selector::xpath("//div[@contenteditable='true' and @data-tab='3']"),
            Selector::xpath("//div[@title='Search or start new chat']"),
            Selector::css("div[contenteditable='true'][data-tab='3']"),
        ],
        per_attempt,
    )
    .with_fallback(Selector::css(EDITABLE_REGION), Pick::First)
}

/// The compose box is usually the last editable region in document order
pub fn message_box(per_attempt: Duration) -> LocatorSpec {
    LocatorSpec::new(
        Role::MessageBox,
        vec![
            Selector::xpath("//div[@contenteditable='true' and @data-tab='10']"),
            Selector::xpath("//div[@contenteditable='true' and @data-tab='6']"),
            Selector::css("div[contenteditable='true'][data-tab='10']"),
        ],
        per_attempt,
    )
    .with_fallback(Selector::css(EDITABLE_REGION), Pick::Last)
}

/// Search result whose title is exactly `name`
pub fn contact_label(name: &str, per_attempt: Duration) -> LocatorSpec {
    LocatorSpec::new(
        Role::ContactLabel,
        vec![Selector::xpath(format!(
            "//span[@title={}]",
            xpath_literal(name)
        ))],
        per_attempt,
    )
}

/// First entry of the search result list, whatever its label
pub fn first_result(per_attempt: Duration) -> LocatorSpec {
    LocatorSpec::new(
        Role::ResultItem,
        vec![
            Selector::css("div._2aBzC"),
            Selector::css("#pane-side div[role='listitem']"),
        ],
        per_attempt,
    )
}

/// Patterns for an outgoing bubble containing `text`
///
/// Each pattern matches on a single text node. A multi-line message renders as
/// several nodes split by `<br>`, so it never matches and verifies as
/// [`DeliveryStatus::Unconfirmed`](crate::types::DeliveryStatus::Unconfirmed).
pub fn sent_confirmation(text: &str) -> Vec<Selector> {
    let literal = xpath_literal(text);
    vec![
        Selector::xpath(format!(
            "//div[contains(@class,'message-out') or contains(@data-testid,'msg-out')]//span[contains(text(), {})]",
            literal
        )),
        Selector::xpath(format!(
            "//span[contains(@class,'selectable-text') and contains(text(), {})]",
            literal
        )),
        Selector::xpath(format!(
            "//div[contains(@class,'message-out') and .//span[contains(text(), {})]]",
            literal
        )),
    ]
}

#[cfg(test)]
#[path = "selectors_test.rs"]
mod selectors_test;
