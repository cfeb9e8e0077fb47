//! In-memory authentication session.
//!
//! The access token is never written to browser storage: reloading the page
//! logs the user out.

use std::cell::RefCell;

use common::{LoginResponse, UserRecord};
use yew::prelude::*;

thread_local! {
    static TOKEN: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Bearer token of the current session, if any.
pub fn access_token() -> Option<String> {
    TOKEN.with(|t| t.borrow().clone())
}

fn set_access_token(token: Option<String>) {
    TOKEN.with(|t| *t.borrow_mut() = token);
}

#[derive(Clone, PartialEq)]
pub struct SessionContext {
    pub user: Option<UserRecord>,
    pub sign_in: Callback<LoginResponse>,
    pub sign_out: Callback<()>,
}

impl SessionContext {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionProviderProps {
    pub children: Children,
}

#[function_component(SessionProvider)]
pub fn session_provider(props: &SessionProviderProps) -> Html {
    let user = use_state(|| None::<UserRecord>);

    let sign_in = {
        let user = user.clone();
        Callback::from(move |response: LoginResponse| {
            log::info!(
                "Signed in as {} ({})",
                response.user.email,
                response.user.role.label()
            );
            set_access_token(Some(response.access_token));
            user.set(Some(response.user));
        })
    };

    let sign_out = {
        let user = user.clone();
        Callback::from(move |_| {
            log::info!("Signed out");
            set_access_token(None);
            user.set(None);
        })
    };

    let context = SessionContext {
        user: (*user).clone(),
        sign_in,
        sign_out,
    };

    html! {
        <ContextProvider<SessionContext> context={context}>
            {props.children.clone()}
        </ContextProvider<SessionContext>>
    }
}
