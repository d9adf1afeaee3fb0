/// Visibility of one dialog. Dialogs are independent; opening one does not
/// close another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModalState {
    open: bool,
    aria_hidden: bool,
}

impl Default for ModalState {
    fn default() -> Self {
        ModalState {
            open: false,
            aria_hidden: true,
        }
    }
}

impl ModalState {
    pub fn open(&mut self) {
        self.open = true;
        self.aria_hidden = false;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.aria_hidden = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_aria_hidden(&self) -> bool {
        self.aria_hidden
    }
}

/// A modal that carries the item it is showing.
#[derive(Clone, Debug)]
pub struct Modal<T> {
    state: ModalState,
    content: Option<T>,
}

impl<T> Default for Modal<T> {
    fn default() -> Self {
        Modal {
            state: ModalState::default(),
            content: None,
        }
    }
}

impl<T> Modal<T> {
    pub fn show(&mut self, content: T) {
        self.content = Some(content);
        self.state.open();
    }

    pub fn close(&mut self) {
        self.state.close();
        self.content = None;
    }

    pub fn content(&self) -> Option<&T> {
        self.content.as_ref().filter(|_| self.state.is_open())
    }

    pub fn state(&self) -> ModalState {
        self.state
    }
}
