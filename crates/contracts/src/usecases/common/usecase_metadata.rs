/// Метаданные сценария: индекс, техническое и отображаемое имя
pub trait UseCaseMetadata {
    /// Индекс сценария (например, "u501")
    fn usecase_index() -> &'static str;

    /// Техническое имя (например, "change_ticket_state")
    fn usecase_name() -> &'static str;

    /// Имя для интерфейса
    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// Полное имя вида "u501_change_ticket_state", используется в логах
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
