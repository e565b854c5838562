use contracts::domain::a001_ticket::BadgeTone;
use leptos::prelude::*;
use thaw::*;

fn badge_color(tone: BadgeTone) -> BadgeColor {
    match tone {
        BadgeTone::Info => BadgeColor::Informative,
        BadgeTone::Warning => BadgeColor::Warning,
        BadgeTone::Success => BadgeColor::Success,
        BadgeTone::Danger => BadgeColor::Danger,
        BadgeTone::Secondary => BadgeColor::Subtle,
    }
}

#[component]
pub fn ToneBadge(tone: BadgeTone, #[prop(into)] text: String) -> impl IntoView {
    view! {
        <Badge appearance=BadgeAppearance::Tint color=badge_color(tone)>
            {text}
        </Badge>
    }
}
