use common::{Role, RouteAccess};
use yew::prelude::*;

use crate::components::access::RequireAccess;
use crate::components::layout::layout::Layout;
use crate::components::wizard::ForecastWizardView;

#[function_component(ForecastPage)]
pub fn forecast_page() -> Html {
    html! {
        <RequireAccess access={RouteAccess::AtLeast(Role::Analista)}>
            <Layout title="Gerar Previsão">
                <ForecastWizardView />
            </Layout>
        </RequireAccess>
    }
}
