use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::view::StepProps;

#[function_component(SkuSelector)]
pub fn sku_selector(props: &StepProps) -> Html {
    let input_ref = use_node_ref();
    let skus: Vec<String> = props.handle.read().state().selected_skus().to_vec();

    let add = {
        let handle = props.handle.clone();
        let input_ref = input_ref.clone();
        Callback::from(move |_: ()| {
            let Some(input) = input_ref.cast::<HtmlInputElement>() else {
                return;
            };
            let value = input.value();
            let mut added = false;
            handle.edit(|state| added = state.add_sku(&value));
            if added {
                input.set_value("");
            } else {
                log::debug!("SKU '{}' ignored (blank or duplicate)", value.trim());
            }
        })
    };

    let onkeydown = {
        let add = add.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                add.emit(());
            }
        })
    };

    let onclick = {
        let add = add.clone();
        Callback::from(move |_: MouseEvent| add.emit(()))
    };

    html! {
        <div class="flex flex-col gap-4">
            <div class="join w-full">
                <input
                    ref={input_ref}
                    type="text"
                    class="input input-bordered join-item w-full"
                    placeholder="Digite o código do SKU (ex: PROD123)"
                    {onkeydown}
                />
                <button class="btn btn-primary join-item" {onclick}>
                    <i class="fas fa-plus"></i>
                    {" Adicionar"}
                </button>
            </div>

            {if skus.is_empty() {
                html! { <p class="text-sm text-gray-500">{"Nenhum SKU selecionado."}</p> }
            } else {
                html! {
                    <div class="flex flex-wrap gap-2">
                        {for skus.iter().map(|sku| {
                            let handle = props.handle.clone();
                            let remove = sku.clone();
                            let onclick = Callback::from(move |_: MouseEvent| {
                                handle.edit(|state| {
                                    state.remove_sku(&remove);
                                });
                            });
                            html! {
                                <span key={sku.clone()} class="badge badge-lg badge-primary gap-2">
                                    {sku}
                                    <button class="btn btn-xs btn-ghost btn-circle" {onclick}>
                                        <i class="fas fa-times"></i>
                                    </button>
                                </span>
                            }
                        })}
                    </div>
                }
            }}

            {if skus.len() > 1 {
                html! {
                    <div class="alert alert-warning">
                        <i class="fas fa-exclamation-triangle"></i>
                        <span>{format!("Apenas o primeiro SKU ({}) será enviado para previsão.", skus[0])}</span>
                    </div>
                }
            } else {
                html! {}
            }}
        </div>
    }
}
