use common::{Role, UserListResponse, UserRecord};
use yew::prelude::*;

use super::form::AccountForm;
use crate::api_client::users::{deactivate_user, list_users};
use crate::common::status::{EmptyState, render_remote};
use crate::common::toast::ToastContext;
use crate::hooks::use_remote;
use crate::session::SessionContext;

/// Which form, if any, is open.
#[derive(Clone, PartialEq)]
enum Editing {
    Closed,
    New,
    Existing(UserRecord),
}

fn role_badge(role: Role) -> &'static str {
    match role {
        Role::Gestao => "badge-primary",
        Role::Analista => "badge-secondary",
        Role::Comercial => "badge-accent",
        Role::Unknown => "badge-ghost",
    }
}

/// Account table with create, edit and deactivate actions.
#[function_component(UsersView)]
pub fn users_view() -> Html {
    let include_inactive = use_state(|| false);
    let (remote, reload) = use_remote(*include_inactive, list_users);
    let editing = use_state(|| Editing::Closed);
    let toasts = use_context::<ToastContext>();
    let own_id = use_context::<SessionContext>()
        .and_then(|session| session.user)
        .and_then(|user| user.id_usuario);

    let on_toggle = {
        let include_inactive = include_inactive.clone();
        Callback::from(move |_: Event| include_inactive.set(!*include_inactive))
    };
    let on_new = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(Editing::New))
    };
    let on_close = {
        let editing = editing.clone();
        Callback::from(move |_: ()| editing.set(Editing::Closed))
    };
    let on_saved = {
        let editing = editing.clone();
        let reload = reload.clone();
        Callback::from(move |_: ()| {
            editing.set(Editing::Closed);
            reload.emit(());
        })
    };
    let on_deactivate = {
        let reload = reload.clone();
        Callback::from(move |id: String| {
            let reload = reload.clone();
            let toasts = toasts.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match deactivate_user(&id).await {
                    Ok(response) => {
                        if let Some(toasts) = &toasts {
                            toasts.success(response.message);
                        }
                        reload.emit(());
                    }
                    Err(e) => {
                        if let Some(toasts) = &toasts {
                            toasts.error(e);
                        }
                    }
                }
            });
        })
    };

    let row = |user: &UserRecord| {
        let id = user.id_usuario.clone().unwrap_or_default();
        let active = user.ativo.unwrap_or(true);
        let is_self = own_id.as_deref() == Some(id.as_str());
        let on_edit = {
            let editing = editing.clone();
            let user = user.clone();
            Callback::from(move |_: MouseEvent| editing.set(Editing::Existing(user.clone())))
        };
        let on_remove = {
            let id = id.clone();
            on_deactivate.reform(move |_: MouseEvent| id.clone())
        };

        html! {
            <tr key={id.clone()} class={classes!((!active).then_some("opacity-50"))}>
                <td>{user.display_name()}</td>
                <td>{&user.email}</td>
                <td><span class={classes!("badge", role_badge(user.role))}>{user.role.label()}</span></td>
                <td>{if active { "Ativo" } else { "Inativo" }}</td>
                <td class="flex gap-2 justify-end">
                    <button class="btn btn-xs btn-ghost" onclick={on_edit}>
                        <i class="fas fa-edit"></i>
                    </button>
                    if active && !is_self {
                        <button class="btn btn-xs btn-error btn-outline" onclick={on_remove}>
                            {"Desativar"}
                        </button>
                    }
                </td>
            </tr>
        }
    };

    let body = render_remote(&remote, &reload, |list: &UserListResponse| {
        if list.usuarios.is_empty() {
            return html! { <EmptyState message="Nenhum usuário encontrado." icon="fas fa-users" /> };
        }
        html! {
            <div class="overflow-x-auto">
                <table class="table">
                    <thead>
                        <tr>
                            <th>{"Nome"}</th>
                            <th>{"E-mail"}</th>
                            <th>{"Perfil"}</th>
                            <th>{"Status"}</th>
                            <th></th>
                        </tr>
                    </thead>
                    <tbody>
                        {for list.usuarios.iter().map(row)}
                    </tbody>
                </table>
            </div>
        }
    });

    let form = match &*editing {
        Editing::Closed => Html::default(),
        Editing::New => html! { <AccountForm on_saved={on_saved} on_close={on_close} /> },
        Editing::Existing(user) => html! {
            <AccountForm editing={Some(user.clone())} on_saved={on_saved} on_close={on_close} />
        },
    };

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body gap-4">
                <div class="flex flex-wrap justify-between items-center gap-3">
                    <label class="label cursor-pointer gap-2">
                        <input type="checkbox" class="toggle toggle-sm" checked={*include_inactive} onchange={on_toggle} />
                        <span class="label-text">{"Mostrar inativos"}</span>
                    </label>
                    <button class="btn btn-primary btn-sm" onclick={on_new}>
                        <i class="fas fa-user-plus"></i>
                        {" Novo Usuário"}
                    </button>
                </div>
                {body}
            </div>
            {form}
        </div>
    }
}
