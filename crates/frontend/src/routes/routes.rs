use contracts::domain::a001_ticket::{TicketId, TicketModule};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::hooks::use_params_map;
use leptos_router::path;

use crate::dashboards::ServiceDashboard;
use crate::domain::a001_ticket::ui::edit::TicketEditPage;
use crate::domain::a001_ticket::ui::list::TicketListPage;
use crate::layout::Shell;

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page page--not-found">
            <h2>"Página no encontrada"</h2>
            <a href="/dashboard">"Volver al dashboard"</a>
        </div>
    }
}

/// `/edit_ticket/:id`; нечисловой id ведёт на «не найдено»
#[component]
fn EditTicketRoute() -> impl IntoView {
    let params = use_params_map();
    let id = move || {
        params
            .with(|p| p.get("id"))
            .and_then(|raw| TicketId::from_string(&raw).ok())
    };

    move || match id() {
        Some(id) => view! { <TicketEditPage id=id /> }.into_any(),
        None => view! { <NotFound /> }.into_any(),
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Router>
            <Shell>
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=ServiceDashboard />
                    <Route path=path!("/dashboard") view=ServiceDashboard />
                    <Route
                        path=path!("/technical_service")
                        view=|| view! { <TicketListPage module=TicketModule::TechnicalService /> }
                    />
                    <Route
                        path=path!("/internal_repair")
                        view=|| view! { <TicketListPage module=TicketModule::InternalRepair /> }
                    />
                    <Route
                        path=path!("/warranty")
                        view=|| view! { <TicketListPage module=TicketModule::Warranty /> }
                    />
                    <Route
                        path=path!("/view_technical")
                        view=|| view! { <TicketListPage module=TicketModule::ViewTechnical /> }
                    />
                    <Route path=path!("/edit_ticket/:id") view=EditTicketRoute />
                </Routes>
            </Shell>
        </Router>
    }
}
