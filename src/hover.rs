//! Hover classification for delegated `mouseover`/`mouseout` events.

/// What a hover event's target means for the marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTarget {
    /// Inside an interactive element and not exempted.
    Interactive,
    /// Inside an exempted element; always forces the non-hover state.
    Exempt,
    /// Anything else.
    Plain,
    /// No element at all (e.g. `relatedTarget` when leaving the document).
    None,
}

impl HoverTarget {
    /// Classify from selector matches. Exemption wins over interactivity.
    pub fn classify(exempt: bool, interactive: bool) -> Self {
        if exempt {
            HoverTarget::Exempt
        } else if interactive {
            HoverTarget::Interactive
        } else {
            HoverTarget::Plain
        }
    }

    pub fn is_interactive(&self) -> bool {
        matches!(self, HoverTarget::Interactive)
    }
}

/// Hover state after the pointer enters `target`, or `None` to keep it.
pub fn on_enter(target: HoverTarget) -> Option<bool> {
    match target {
        HoverTarget::Interactive => Some(true),
        HoverTarget::Exempt => Some(false),
        HoverTarget::Plain | HoverTarget::None => None,
    }
}

/// Hover state after the pointer leaves `target` for `related`, or `None`
/// to keep it.
pub fn on_leave(target: HoverTarget, related: HoverTarget) -> Option<bool> {
    if related == HoverTarget::Exempt {
        return Some(false);
    }
    if target.is_interactive() && !related.is_interactive() {
        return Some(false);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exempt_wins() {
        assert_eq!(HoverTarget::classify(true, true), HoverTarget::Exempt);
        assert_eq!(HoverTarget::classify(true, false), HoverTarget::Exempt);
        assert_eq!(HoverTarget::classify(false, true), HoverTarget::Interactive);
        assert_eq!(HoverTarget::classify(false, false), HoverTarget::Plain);
    }

    #[test]
    fn test_enter() {
        assert_eq!(on_enter(HoverTarget::Interactive), Some(true));
        assert_eq!(on_enter(HoverTarget::Exempt), Some(false));
        assert_eq!(on_enter(HoverTarget::Plain), None);
    }

    #[test]
    fn test_leave_within_interactive_keeps_hover() {
        // Moving between children of the same link
        assert_eq!(
            on_leave(HoverTarget::Interactive, HoverTarget::Interactive),
            None
        );
    }

    #[test]
    fn test_leave_interactive() {
        assert_eq!(
            on_leave(HoverTarget::Interactive, HoverTarget::Plain),
            Some(false)
        );
        assert_eq!(
            on_leave(HoverTarget::Interactive, HoverTarget::None),
            Some(false)
        );
        assert_eq!(on_leave(HoverTarget::Plain, HoverTarget::Plain), None);
    }

    #[test]
    fn test_leave_into_exempt() {
        assert_eq!(on_leave(HoverTarget::Plain, HoverTarget::Exempt), Some(false));
    }
}
