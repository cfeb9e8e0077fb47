use common::{AccessDecision, RouteAccess};
use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::login::LoginPage;
use crate::router::Route;
use crate::session::SessionContext;

#[derive(Properties, PartialEq)]
pub struct RequireAccessProps {
    pub access: RouteAccess,
    pub children: Children,
}

/// Renders its children only when the session satisfies `access`.
///
/// Without a session the login form takes the page's place; once the user
/// signs in the guarded content appears without navigating.
#[function_component(RequireAccess)]
pub fn require_access(props: &RequireAccessProps) -> Html {
    let session = use_context::<SessionContext>();
    let user = session.as_ref().and_then(|s| s.user.as_ref());

    match props.access.check(user) {
        AccessDecision::Granted => html! { <>{props.children.clone()}</> },
        AccessDecision::Unauthenticated => {
            log::debug!("No session, showing login");
            html! { <LoginPage /> }
        }
        AccessDecision::Denied => {
            log::warn!(
                "Access denied for role {:?} (requires {:?})",
                user.map(|u| u.role),
                props.access
            );
            html! { <AccessDenied /> }
        }
    }
}

#[function_component(AccessDenied)]
fn access_denied() -> Html {
    let session = use_context::<SessionContext>();
    let navigator = use_navigator();

    let on_back = Callback::from(move |_: MouseEvent| {
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Home);
        }
    });

    let on_switch = Callback::from(move |_: MouseEvent| {
        if let Some(session) = &session {
            session.sign_out.emit(());
        }
    });

    html! {
        <div class="hero min-h-[60vh]">
            <div class="hero-content text-center">
                <div class="max-w-md">
                    <i class="fas fa-lock text-5xl text-error mb-4"></i>
                    <h1 class="text-3xl font-bold">{"Acesso negado"}</h1>
                    <p class="py-6 text-gray-500">
                        {"Seu perfil não tem permissão para acessar esta página."}
                    </p>
                    <div class="flex gap-4 justify-center">
                        <button class="btn btn-outline" onclick={on_back}>{"Voltar"}</button>
                        <button class="btn btn-primary" onclick={on_switch}>{"Trocar Conta"}</button>
                    </div>
                </div>
            </div>
        </div>
    }
}
