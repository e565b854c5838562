//! Боковое меню: дашборд и списки тикетов по модулям

use contracts::domain::a001_ticket::TicketModule;
use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::shared::icons::icon;

#[derive(Clone, Debug, PartialEq)]
struct MenuItem {
    path: String,
    label: &'static str,
    icon: &'static str,
}

fn module_icon(module: TicketModule) -> &'static str {
    match module {
        TicketModule::TechnicalService => "wrench",
        TicketModule::InternalRepair => "cpu",
        TicketModule::Warranty => "shield",
        TicketModule::ViewTechnical => "user",
    }
}

fn menu_items() -> Vec<MenuItem> {
    std::iter::once(MenuItem {
        path: "/dashboard".to_string(),
        label: "Dashboard",
        icon: "dashboard",
    })
    .chain(TicketModule::ALL.into_iter().map(|m| MenuItem {
        path: m.page_path(),
        label: m.title(),
        icon: module_icon(m),
    }))
    .collect()
}

/// Пункт активен на своей странице; дашборд также на `/`
fn is_active(item_path: &str, pathname: &str) -> bool {
    let pathname = pathname.trim_end_matches('/');
    pathname == item_path || (pathname.is_empty() && item_path == "/dashboard")
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let location = use_location();

    view! {
        <nav class="app-sidebar__content">
            {menu_items()
                .into_iter()
                .map(|item| {
                    let path = StoredValue::new(item.path.clone());
                    view! {
                        <a
                            href=item.path
                            class="app-sidebar__item"
                            class:app-sidebar__item--active=move || {
                                is_active(&path.get_value(), &location.pathname.get())
                            }
                            style:padding-left="12px"
                        >
                            <div class="app-sidebar__item-content">
                                {icon(item.icon)}
                                <span>{item.label}</span>
                            </div>
                        </a>
                    }
                })
                .collect_view()}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_lists_dashboard_and_modules() {
        let items = menu_items();
        assert_eq!(items.len(), 1 + TicketModule::ALL.len());
        assert_eq!(items[1].path, "/technical_service");
    }

    #[test]
    fn test_active_item() {
        assert!(is_active("/dashboard", "/"));
        assert!(is_active("/warranty", "/warranty/"));
        assert!(!is_active("/warranty", "/internal_repair"));
    }
}
