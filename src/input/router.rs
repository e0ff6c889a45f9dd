/// Handle for an installed local key monitor
///
/// Returned by `KeyRouter::add_monitor` and required to remove it again.
/// Not Clone, so each installed monitor has exactly one handle.
#[derive(Debug, PartialEq, Eq)]
pub struct CaptureHandle(u64);

impl CaptureHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Registry of local key monitors for the terminal surface
///
/// Key events are offered to the newest monitor first; whatever it doesn't
/// consume falls through to the normal key handling.
#[derive(Debug, Default)]
pub struct KeyRouter {
    next_id: u64,
    monitors: Vec<u64>,
}

impl KeyRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a new monitor
    pub fn add_monitor(&mut self) -> CaptureHandle {
        self.next_id += 1;
        self.monitors.push(self.next_id);
        log::debug!("Installed key monitor {}", self.next_id);
        CaptureHandle(self.next_id)
    }

    /// Remove a monitor, returns false if it was not installed
    pub fn remove_monitor(&mut self, handle: CaptureHandle) -> bool {
        let before = self.monitors.len();
        self.monitors.retain(|&id| id != handle.0);
        let removed = self.monitors.len() != before;
        if removed {
            log::debug!("Removed key monitor {}", handle.0);
        }
        removed
    }

    /// The monitor that receives the next key event, if any
    pub fn active(&self) -> Option<u64> {
        self.monitors.last().copied()
    }

    pub fn is_installed(&self, handle: &CaptureHandle) -> bool {
        self.monitors.contains(&handle.0)
    }

    pub fn monitor_count(&self) -> usize {
        self.monitors.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_remove_monitor() {
        let mut router = KeyRouter::new();
        assert_eq!(router.active(), None);

        let handle = router.add_monitor();
        assert!(router.is_installed(&handle));
        assert_eq!(router.active(), Some(handle.id()));

        assert!(router.remove_monitor(handle));
        assert_eq!(router.monitor_count(), 0);
        assert_eq!(router.active(), None);
    }

    #[test]
    fn test_newest_monitor_is_active() {
        let mut router = KeyRouter::new();
        let first = router.add_monitor();
        let second = router.add_monitor();
        assert_ne!(first.id(), second.id());
        assert_eq!(router.active(), Some(second.id()));

        router.remove_monitor(second);
        assert_eq!(router.active(), Some(first.id()));
    }

    #[test]
    fn test_remove_unknown_monitor() {
        let mut router = KeyRouter::new();
        let handle = router.add_monitor();
        let id = handle.id();
        router.remove_monitor(handle);
        assert!(!router.remove_monitor(CaptureHandle(id)));
    }
}
