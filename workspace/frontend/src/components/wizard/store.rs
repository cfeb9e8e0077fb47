use std::cell::{Cell, Ref, RefCell};
use std::rc::Rc;

use wizard::{ForecastWizard, WizardState};
use yew::prelude::*;

/// Shared handle to the page's [`ForecastWizard`].
///
/// Step components receive it as a prop and never touch the wizard fields
/// directly: every change goes through [`WizardHandle::update`], which bumps
/// the revision and re-renders the page.
#[derive(Clone)]
pub struct WizardHandle {
    wizard: Rc<RefCell<ForecastWizard>>,
    revision: u64,
    counter: Rc<Cell<u64>>,
    refresh: Callback<()>,
}

impl PartialEq for WizardHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.wizard, &other.wizard) && self.revision == other.revision
    }
}

impl WizardHandle {
    pub fn read(&self) -> Ref<'_, ForecastWizard> {
        self.wizard.borrow()
    }

    pub fn update<R>(&self, change: impl FnOnce(&mut ForecastWizard) -> R) -> R {
        let outcome = change(&mut self.wizard.borrow_mut());
        self.counter.set(self.counter.get() + 1);
        self.refresh.emit(());
        outcome
    }

    /// Applies a form edit; refused edits are only logged.
    pub fn edit(&self, change: impl FnOnce(&mut WizardState)) {
        if let Err(e) = self.update(|wizard| wizard.edit(change)) {
            log::warn!("Wizard edit refused: {}", e);
        }
    }

    pub fn try_edit(&self, change: impl FnOnce(&mut WizardState) -> wizard::Result<()>) {
        if let Err(e) = self.update(|wizard| wizard.try_edit(change)) {
            log::warn!("Wizard edit rejected: {}", e);
        }
    }
}

/// Creates the wizard owned by the calling component. It lives as long as
/// the component stays mounted.
#[hook]
pub fn use_forecast_wizard() -> WizardHandle {
    let wizard = use_mut_ref(ForecastWizard::new);
    let counter = use_memo((), |_| Cell::new(0u64));
    let force_update = use_force_update();

    let refresh = use_callback((), move |_: (), _| force_update.force_update());

    WizardHandle {
        wizard,
        revision: counter.get(),
        counter,
        refresh,
    }
}
