// Page lifecycle decisions for the animation loop.

/// What to do with the running loop when the page is hidden.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HideAction {
    /// Page is entering the back/forward cache; pause and keep everything.
    Suspend,
    /// Page is being discarded; drop the callback and the overlay.
    Release,
}

pub fn on_pagehide(persisted: bool) -> HideAction {
    if persisted {
        HideAction::Suspend
    } else {
        HideAction::Release
    }
}

/// A `pageshow` only needs a restart when the page came back from the cache.
/// A fresh load starts its own loop.
pub fn resume_on_pageshow(persisted: bool) -> bool {
    persisted
}
