use common::{Role, RouteAccess};
use yew::prelude::*;

use crate::components::access::RequireAccess;
use crate::components::layout::layout::Layout;
use crate::components::users::UsersView;

#[function_component(UsersPage)]
pub fn users_page() -> Html {
    html! {
        <RequireAccess access={RouteAccess::AtLeast(Role::Gestao)}>
            <Layout title="Usuários">
                <UsersView />
            </Layout>
        </RequireAccess>
    }
}
