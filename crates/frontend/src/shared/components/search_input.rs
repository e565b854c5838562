use crate::shared::debounce::Debouncer;
use crate::shared::icons::icon;
use leptos::prelude::*;

/// Поле поиска с debounce и кнопкой очистки
///
/// `on_change` вызывается после паузы ввода; очистка срабатывает сразу.
#[component]
pub fn SearchInput(
    /// Начальное значение (например, из URL)
    #[prop(into)]
    initial: String,
    on_change: Callback<String>,
    delay_ms: u32,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Buscar...".to_string()
    } else {
        placeholder
    };

    let input_value = RwSignal::new(initial);
    let debouncer = Debouncer::new(delay_ms);

    let handle_input = move |raw: String| {
        input_value.set(raw.clone());
        debouncer.call(move || on_change.run(raw));
    };

    let clear = move |_| {
        debouncer.cancel();
        input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <span class="search-input__icon">{icon("search")}</span>
            <input
                type="text"
                class="search-input__field"
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" title="Limpiar" on:click=clear>
                    {icon("x")}
                </button>
            </Show>
        </div>
    }
}
