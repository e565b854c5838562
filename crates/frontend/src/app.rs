use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::dialog::DialogService;
use crate::shared::toast::ToastService;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppGlobalContext::new());

    // Уведомления и диалоги доступны любой странице через контекст
    provide_context(ToastService::new());
    provide_context(DialogService::new());

    view! {
        <AppRoutes />
    }
}
