use common::{Role, UserCreateRequest, UserRecord, UserUpdateRequest, account_form_problems};
use web_sys::{FormData, HtmlFormElement};
use yew::prelude::*;

use crate::api_client::users::{create_user, update_user};
use crate::common::toast::ToastContext;

#[derive(Properties, PartialEq)]
pub struct AccountFormProps {
    /// Account being edited; `None` creates a new one
    #[prop_or_default]
    pub editing: Option<UserRecord>,
    pub on_saved: Callback<()>,
    pub on_close: Callback<()>,
}

fn field(form_data: &FormData, name: &str) -> String {
    form_data.get(name).as_string().unwrap_or_default().trim().to_string()
}

/// Modal form creating or editing an account.
#[function_component(AccountForm)]
pub fn account_form(props: &AccountFormProps) -> Html {
    let toasts = use_context::<ToastContext>();
    let form_ref = use_node_ref();
    let problems = use_state(Vec::<&'static str>::new);
    let saving = use_state(|| false);

    let editing_id = props.editing.as_ref().and_then(|user| user.id_usuario.clone());
    let is_new = props.editing.is_none();

    let on_submit = {
        let form_ref = form_ref.clone();
        let problems = problems.clone();
        let saving = saving.clone();
        let on_saved = props.on_saved.clone();
        let editing_id = editing_id.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let Some(form) = form_ref.cast::<HtmlFormElement>() else {
                return;
            };
            let Ok(form_data) = FormData::new_with_form(&form) else {
                problems.set(vec!["Não foi possível ler o formulário"]);
                return;
            };

            let nome = field(&form_data, "nome");
            let email = field(&form_data, "email");
            let senha = form_data.get("senha").as_string().unwrap_or_default();
            let role = Role::from_key(&field(&form_data, "role")).unwrap_or(Role::Comercial);
            let ativo = form_data.get("ativo").as_string().is_some();

            let found = account_form_problems(&nome, &email, is_new.then_some(senha.as_str()));
            if !found.is_empty() {
                problems.set(found.into_iter().map(|(_, message)| message).collect());
                return;
            }
            problems.set(Vec::new());
            saving.set(true);

            let saving = saving.clone();
            let on_saved = on_saved.clone();
            let toasts = toasts.clone();
            let editing_id = editing_id.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = match &editing_id {
                    Some(id) => {
                        let changes = UserUpdateRequest {
                            nome: Some(nome),
                            email: Some(email),
                            role: Some(role),
                            ativo: Some(ativo),
                        };
                        update_user(id, &changes).await
                    }
                    None => {
                        let request = UserCreateRequest { nome, email, role, senha, ativo: true };
                        create_user(&request).await
                    }
                };
                saving.set(false);

                match outcome {
                    Ok(user) => {
                        if let Some(toasts) = &toasts {
                            toasts.success(format!("Usuário {} salvo", user.display_name()));
                        }
                        on_saved.emit(());
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

    let current = props.editing.clone();
    let current_role = current.as_ref().map(|user| user.role).unwrap_or(Role::Comercial);
    let title = if is_new { "Novo Usuário" } else { "Editar Usuário" };
    let on_cancel = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <div class="modal modal-open">
            <div class="modal-box">
                <h3 class="font-bold text-lg mb-4">{title}</h3>
                if !problems.is_empty() {
                    <div class="alert alert-warning mb-4">
                        <ul>
                            {for problems.iter().map(|problem| html! { <li>{*problem}</li> })}
                        </ul>
                    </div>
                }
                <form ref={form_ref} onsubmit={on_submit} class="flex flex-col gap-3">
                    <input
                        name="nome"
                        class="input input-bordered"
                        placeholder="Nome"
                        value={current.as_ref().and_then(|user| user.nome.clone()).unwrap_or_default()}
                    />
                    <input
                        name="email"
                        type="email"
                        class="input input-bordered"
                        placeholder="E-mail"
                        value={current.as_ref().map(|user| user.email.clone()).unwrap_or_default()}
                    />
                    <select name="role" class="select select-bordered">
                        {for Role::ASSIGNABLE.iter().map(|role| html! {
                            <option key={role.key()} value={role.key()} selected={*role == current_role}>
                                {role.label()}
                            </option>
                        })}
                    </select>
                    if is_new {
                        <input name="senha" type="password" class="input input-bordered" placeholder="Senha" />
                    } else {
                        <label class="label cursor-pointer justify-start gap-3">
                            <input
                                name="ativo"
                                type="checkbox"
                                class="checkbox"
                                checked={current.as_ref().and_then(|user| user.ativo).unwrap_or(true)}
                            />
                            <span class="label-text">{"Ativo"}</span>
                        </label>
                    }
                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" onclick={on_cancel}>{"Cancelar"}</button>
                        <button type="submit" class="btn btn-primary" disabled={*saving}>
                            if *saving {
                                <span class="loading loading-spinner loading-sm"></span>
                            }
                            {"Salvar"}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
