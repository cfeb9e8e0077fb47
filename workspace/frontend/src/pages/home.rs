use common::RouteAccess;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::access::RequireAccess;
use crate::components::history::HistoryView;
use crate::components::layout::layout::Layout;
use crate::router::Route;
use crate::session::SessionContext;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    let session = use_context::<SessionContext>();
    let greeting = session
        .as_ref()
        .and_then(|s| s.user.as_ref())
        .map(|u| format!("Olá, {}", u.display_name()))
        .unwrap_or_default();

    html! {
        <RequireAccess access={RouteAccess::Authenticated}>
            <Layout title="Início">
                <div class="flex flex-col gap-6">
                    <div class="card bg-base-100 shadow">
                        <div class="card-body">
                            <h2 class="card-title text-2xl">{greeting}</h2>
                            <p class="text-gray-500">
                                {"Configure horizonte, modelo e granularidade e gere uma nova previsão de demanda."}
                            </p>
                            <div class="card-actions justify-end">
                                <Link<Route> to={Route::GerarPrevisao} classes="btn btn-primary">
                                    <i class="fas fa-magic"></i>
                                    {" Gerar Previsão"}
                                </Link<Route>>
                            </div>
                        </div>
                    </div>
                    <HistoryView />
                </div>
            </Layout>
        </RequireAccess>
    }
}
