//! Page detection and the ordered list of start-up initializers.

use crate::error::LookupError;

/// Which page of the site the client was loaded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// Upload page with the three mode blocks
    Landing,
    /// `/one`
    OneResult,
    /// `/all`
    AllResults,
    /// `/choice`
    Choice,
    /// Any other page (about, choice result); only chrome runs
    Other,
}

impl PageKind {
    /// Detect from the body's classes and whether the landing blocks exist.
    pub fn detect<'c>(body_classes: impl IntoIterator<Item = &'c str>, has_mode_blocks: bool) -> Self {
        if has_mode_blocks {
            return PageKind::Landing;
        }
        for class in body_classes {
            match class {
                "page-one" => return PageKind::OneResult,
                "page-all" => return PageKind::AllResults,
                "page-choice" => return PageKind::Choice,
                _ => {}
            }
        }
        PageKind::Other
    }
}

type InitFn<C> = Box<dyn Fn(&C) -> Result<(), LookupError>>;

/// Start-up hooks run once, in registration order, when the page is ready.
///
/// A failing hook is logged and does not stop the ones after it.
pub struct Initializers<C> {
    hooks: Vec<(&'static str, InitFn<C>)>,
}

impl<C> Default for Initializers<C> {
    fn default() -> Self {
        Self { hooks: Vec::new() }
    }
}

impl<C> Initializers<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a named hook.
    pub fn register(
        mut self,
        name: &'static str,
        hook: impl Fn(&C) -> Result<(), LookupError> + 'static,
    ) -> Self {
        self.hooks.push((name, Box::new(hook)));
        self
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run every hook; returns how many succeeded.
    pub fn run(&self, context: &C) -> usize {
        let mut succeeded = 0;
        for (name, hook) in &self.hooks {
            match hook(context) {
                Ok(()) => {
                    log::debug!("🚀 Initializer '{}' done", name);
                    succeeded += 1;
                }
                Err(e) => log::error!("❌ Initializer '{}' failed: {}", name, e),
            }
        }
        succeeded
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    #[test]
    fn test_detect_page() {
        assert_eq!(PageKind::detect(["page-all"], true), PageKind::Landing);
        assert_eq!(PageKind::detect(["theme", "page-one"], false), PageKind::OneResult);
        assert_eq!(PageKind::detect(["page-all"], false), PageKind::AllResults);
        assert_eq!(PageKind::detect(["page-choice"], false), PageKind::Choice);
        assert_eq!(PageKind::detect(Vec::<&str>::new(), false), PageKind::Other);
    }

    #[test]
    fn test_initializers_run_in_order() {
        let log: RefCell<Vec<&'static str>> = RefCell::new(Vec::new());
        let inits = Initializers::new()
            .register("chrome", |log: &RefCell<Vec<&'static str>>| {
                log.borrow_mut().push("chrome");
                Ok(())
            })
            .register("upload", |log: &RefCell<Vec<&'static str>>| {
                log.borrow_mut().push("upload");
                Ok(())
            });

        assert_eq!(inits.len(), 2);
        assert_eq!(inits.run(&log), 2);
        assert_eq!(*log.borrow(), vec!["chrome", "upload"]);
    }

    #[test]
    fn test_failing_initializer_does_not_stop_later_ones() {
        let count = RefCell::new(0);
        let inits = Initializers::new()
            .register("broken", |_: &RefCell<i32>| {
                Err(LookupError::Dom("missing element".to_string()))
            })
            .register("counter", |count: &RefCell<i32>| {
                *count.borrow_mut() += 1;
                Ok(())
            });

        assert_eq!(inits.run(&count), 1);
        assert_eq!(*count.borrow(), 1);
    }
}
