use common::Role;
use yew::prelude::*;
use yew_router::prelude::*;
use crate::router::Route;
use crate::session::SessionContext;

#[function_component(Sidebar)]
pub fn sidebar() -> Html {
    let is_manager = use_context::<SessionContext>()
        .and_then(|session| session.user)
        .is_some_and(|user| user.role == Role::Gestao);

    html! {
        <div class="drawer-side z-50">
            <label aria-label="close sidebar" class="drawer-overlay" for="app-drawer"></label>
            <ul class="menu p-4 w-72 min-h-full bg-base-100 text-base-content border-r border-base-300">
                <li class="mb-4">
                    <div class="flex items-center gap-3 px-2">
                        <div class="w-10 h-10 rounded-lg bg-primary flex items-center justify-center text-primary-content font-bold text-2xl">
                            <i class="fas fa-chart-line"></i>
                        </div>
                        <span class="text-2xl font-bold tracking-tight">{"DemandCast"}</span>
                    </div>
                </li>

                <li><Link<Route> to={Route::Home} classes="nav-link"><i class="fas fa-home w-5"></i> {"Início"}</Link<Route>></li>
                <li><Link<Route> to={Route::GerarPrevisao} classes="nav-link"><i class="fas fa-magic w-5"></i> {"Gerar Previsão"}</Link<Route>></li>
                <li><Link<Route> to={Route::Historico} classes="nav-link"><i class="fas fa-history w-5"></i> {"Histórico"}</Link<Route>></li>
                if is_manager {
                    <li><Link<Route> to={Route::Usuarios} classes="nav-link"><i class="fas fa-users w-5"></i> {"Usuários"}</Link<Route>></li>
                }
            </ul>
        </div>
    }
}
