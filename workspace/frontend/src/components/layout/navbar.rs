use common::Role;
use yew::prelude::*;

use crate::session::SessionContext;

#[derive(Properties, PartialEq)]
pub struct Props {
    pub title: String,
    #[prop_or_default]
    pub on_refresh: Option<Callback<()>>,
}

fn role_badge(role: Role) -> &'static str {
    match role {
        Role::Gestao => "badge badge-primary",
        Role::Analista => "badge badge-secondary",
        Role::Comercial => "badge badge-accent",
        Role::Unknown => "badge badge-ghost",
    }
}

#[function_component(Navbar)]
pub fn navbar(props: &Props) -> Html {
    let session = use_context::<SessionContext>();
    let user = session.as_ref().and_then(|s| s.user.clone());

    let on_sign_out = {
        let session = session.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(session) = &session {
                session.sign_out.emit(());
            }
        })
    };

    html! {
        <div class="navbar bg-base-100 shadow-sm z-40 sticky top-0">
            <div class="flex-none lg:hidden">
                <label aria-label="open sidebar" class="btn btn-square btn-ghost" for="app-drawer">
                    <i class="fas fa-bars text-xl"></i>
                </label>
            </div>
            <div class="flex-1 px-4">
                <h1 class="text-xl font-bold">{ &props.title }</h1>
            </div>
            <div class="flex-none gap-3 items-center">
                if let Some(on_refresh) = props.on_refresh.clone() {
                    <button class="btn btn-ghost btn-circle" title="Atualizar" onclick={on_refresh.reform(|_: MouseEvent| ())}>
                        <i class="fas fa-sync-alt"></i>
                    </button>
                }
                if let Some(user) = user {
                    <span class="hidden md:inline font-medium">{user.display_name().to_string()}</span>
                    <span class={role_badge(user.role)}>{user.role.label()}</span>
                    <button class="btn btn-sm btn-outline" onclick={on_sign_out}>
                        <i class="fas fa-sign-out-alt"></i>
                        {" Sair"}
                    </button>
                }
            </div>
        </div>
    }
}
