use common::RouteAccess;
use yew::prelude::*;

use crate::components::access::RequireAccess;
use crate::components::history::HistoryView;
use crate::components::layout::layout::Layout;

#[function_component(HistoryPage)]
pub fn history_page() -> Html {
    let refresh_trigger = use_state(|| 0);

    let on_refresh = {
        let refresh_trigger = refresh_trigger.clone();
        Callback::from(move |_| {
            log::debug!("History page refresh triggered");
            refresh_trigger.set(*refresh_trigger + 1);
        })
    };

    html! {
        <RequireAccess access={RouteAccess::Authenticated}>
            <Layout title="Histórico" on_refresh={Some(on_refresh)}>
                <HistoryView key={*refresh_trigger} show_all={true} />
            </Layout>
        </RequireAccess>
    }
}
