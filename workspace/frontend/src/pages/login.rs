use common::LoginRequest;
use web_sys::{FormData, HtmlFormElement};
use yew::prelude::*;

use crate::api_client::auth::login;
use crate::common::toast::ToastContext;
use crate::session::SessionContext;

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    let session = use_context::<SessionContext>();
    let toast_ctx = use_context::<ToastContext>();
    let form_ref = use_node_ref();
    let is_submitting = use_state(|| false);
    let error_message = use_state(|| None::<String>);

    let on_submit = {
        let form_ref = form_ref.clone();
        let is_submitting = is_submitting.clone();
        let error_message = error_message.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();

            let Some(session) = session.clone() else {
                log::error!("Login form rendered outside of a SessionProvider");
                return;
            };
            let Some(form) = form_ref.cast::<HtmlFormElement>() else {
                return;
            };
            let Ok(form_data) = FormData::new_with_form(&form) else {
                error_message.set(Some("Não foi possível ler o formulário".to_string()));
                return;
            };

            let request = LoginRequest {
                email: form_data.get("email").as_string().unwrap_or_default().trim().to_string(),
                senha: form_data.get("senha").as_string().unwrap_or_default(),
            };
            if request.email.is_empty() || request.senha.is_empty() {
                error_message.set(Some("Informe e-mail e senha".to_string()));
                return;
            }

            is_submitting.set(true);
            error_message.set(None);

            let is_submitting = is_submitting.clone();
            let error_message = error_message.clone();
            let toast_ctx = toast_ctx.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match login(request).await {
                    Ok(response) => {
                        if let Some(toast_ctx) = &toast_ctx {
                            toast_ctx.info(format!("Bem-vindo, {}", response.user.display_name()));
                        }
                        session.sign_in.emit(response);
                    }
                    Err(e) => error_message.set(Some(e)),
                }
                is_submitting.set(false);
            });
        })
    };

    html! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <div class="w-14 h-14 mx-auto rounded-lg bg-primary flex items-center justify-center text-primary-content text-3xl">
                        <i class="fas fa-chart-line"></i>
                    </div>
                    <h1 class="text-3xl font-bold mt-4">{"DemandCast"}</h1>
                    <p class="text-gray-500">{"Entre para continuar"}</p>
                </div>
                <div class="card w-full bg-base-100 shadow">
                    <form ref={form_ref} onsubmit={on_submit} class="card-body gap-4">
                        if let Some(error) = (*error_message).clone() {
                            <div class="alert alert-error">
                                <i class="fas fa-exclamation-circle"></i>
                                <span>{error}</span>
                            </div>
                        }
                        <div class="form-control">
                            <label class="label"><span class="label-text">{"E-mail"}</span></label>
                            <input type="email" name="email" class="input input-bordered w-full" required={true} disabled={*is_submitting} />
                        </div>
                        <div class="form-control">
                            <label class="label"><span class="label-text">{"Senha"}</span></label>
                            <input type="password" name="senha" class="input input-bordered w-full" required={true} disabled={*is_submitting} />
                        </div>
                        <button type="submit" class="btn btn-primary" disabled={*is_submitting}>
                            if *is_submitting {
                                <span class="loading loading-spinner"></span>
                                {" Entrando..."}
                            } else {
                                {"Entrar"}
                            }
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}
