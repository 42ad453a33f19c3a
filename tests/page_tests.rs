// Host-side tests for the page lifecycle decisions.

#![allow(dead_code)]
mod page {
    include!("../src/events/page.rs");
}

use page::*;

#[test]
fn cached_page_is_suspended_not_released() {
    assert_eq!(on_pagehide(true), HideAction::Suspend);
    assert!(resume_on_pageshow(true));
}

#[test]
fn discarded_page_releases_the_loop() {
    assert_eq!(on_pagehide(false), HideAction::Release);
    assert!(!resume_on_pageshow(false));
}
