use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::layout::layout::Layout;
use crate::pages::forecast::ForecastPage;
use crate::pages::history::HistoryPage;
use crate::pages::home::HomePage;
use crate::pages::users::UsersPage;

#[derive(Debug, Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/gerar-previsao")]
    GerarPrevisao,
    #[at("/historico")]
    Historico,
    #[at("/usuarios")]
    Usuarios,
    #[not_found]
    #[at("/404")]
    NotFound,
}

pub fn switch(routes: Route) -> Html {
    log::debug!("Routing to: {:?}", routes);
    match routes {
        Route::Home => {
            log::trace!("Rendering Home page");
            html! { <HomePage /> }
        }
        Route::GerarPrevisao => {
            log::trace!("Rendering forecast wizard page");
            html! { <ForecastPage /> }
        }
        Route::Historico => {
            log::trace!("Rendering History page");
            html! { <HistoryPage /> }
        }
        Route::Usuarios => {
            log::trace!("Rendering user management page");
            html! { <UsersPage /> }
        }
        Route::NotFound => {
            log::warn!("404 - Route not found");
            html! { <Layout title="404"><h1>{"Página não encontrada"}</h1></Layout> }
        }
    }
}
