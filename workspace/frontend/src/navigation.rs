/// Blocking user notifications and page navigation.
pub trait Navigator {
    fn alert(&self, message: &str);
    fn redirect(&self, url: &str);
}

/// `window.alert` and `window.location.href`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn alert(&self, message: &str) {
        let Some(window) = web_sys::window() else {
            log::warn!("No window to alert: {}", message);
            return;
        };
        if let Err(e) = window.alert_with_message(message) {
            log::error!("window.alert failed: {:?}", e);
        }
    }

    fn redirect(&self, url: &str) {
        log::info!("Redirecting to {}", url);
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Err(e) = window.location().set_href(url) {
            log::error!("Redirect to {} failed: {:?}", url, e);
        }
    }
}

impl<N: Navigator + ?Sized> Navigator for std::rc::Rc<N> {
    fn alert(&self, message: &str) {
        (**self).alert(message)
    }

    fn redirect(&self, url: &str) {
        (**self).redirect(url)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Navigator;
    use std::cell::RefCell;

    /// Records alerts and redirects instead of touching the page.
    #[derive(Default)]
    pub struct RecordingNavigator {
        pub alerts: RefCell<Vec<String>>,
        pub redirects: RefCell<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }

        fn redirect(&self, url: &str) {
            self.redirects.borrow_mut().push(url.to_string());
        }
    }
}
