use super::aggregate::{ServiceType, TicketState};

/// Рабочий поток тикетов (страница списка)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TicketModule {
    TechnicalService,
    InternalRepair,
    Warranty,
    ViewTechnical,
}

impl TicketModule {
    pub const ALL: [TicketModule; 4] = [
        TicketModule::TechnicalService,
        TicketModule::InternalRepair,
        TicketModule::Warranty,
        TicketModule::ViewTechnical,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            TicketModule::TechnicalService => "technical_service",
            TicketModule::InternalRepair => "internal_repair",
            TicketModule::Warranty => "warranty",
            TicketModule::ViewTechnical => "view_technical",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        TicketModule::ALL.into_iter().find(|m| m.key() == key)
    }

    pub fn title(&self) -> &'static str {
        match self {
            TicketModule::TechnicalService => "Servicio Técnico",
            TicketModule::InternalRepair => "Reparación Interna",
            TicketModule::Warranty => "Garantías",
            TicketModule::ViewTechnical => "Mis Tickets",
        }
    }

    /// Путь страницы списка
    pub fn page_path(&self) -> String {
        format!("/{}", self.key())
    }

    /// JSON-эндпоинт списка, относительно базового URL API
    pub fn list_endpoint(&self) -> String {
        format!("/tickets/api/{}", self.key())
    }

    /// Эндпоинт единого поиска; все модули ищут через общий обработчик
    pub fn search_endpoint(&self) -> &'static str {
        match self {
            TicketModule::TechnicalService
            | TicketModule::InternalRepair
            | TicketModule::Warranty
            | TicketModule::ViewTechnical => "/tickets/search_tickets",
        }
    }

    /// Тип обслуживания тикетов модуля; у вида техника: любые
    pub fn service_type(&self) -> Option<ServiceType> {
        match self {
            TicketModule::TechnicalService => Some(ServiceType::TechnicalService),
            TicketModule::InternalRepair => Some(ServiceType::InternalRepair),
            TicketModule::Warranty => Some(ServiceType::Warranty),
            TicketModule::ViewTechnical => None,
        }
    }

    /// Стадии, которые модуль предлагает в селекторе статуса
    pub fn offered_states(&self) -> &'static [TicketState] {
        const TECHNICIAN: [TicketState; 3] = [
            TicketState::Asignado,
            TicketState::EnProceso,
            TicketState::EnRevision,
        ];
        match self {
            TicketModule::ViewTechnical => &TECHNICIAN,
            _ => &TicketState::ALL,
        }
    }

    /// Опции селектора: предлагаемые стадии плюс текущая, по порядку
    pub fn selectable_states(&self, current: TicketState) -> Vec<TicketState> {
        let mut states: Vec<TicketState> = self.offered_states().to_vec();
        if !states.contains(&current) {
            states.push(current);
            states.sort();
        }
        states
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_round_trip() {
        for m in TicketModule::ALL {
            assert_eq!(TicketModule::from_key(m.key()), Some(m));
        }
        assert_eq!(TicketModule::from_key("dashboard"), None);
        assert_eq!(TicketModule::Warranty.list_endpoint(), "/tickets/api/warranty");
    }

    #[test]
    fn test_search_endpoint() {
        for m in TicketModule::ALL {
            assert_eq!(m.search_endpoint(), "/tickets/search_tickets");
        }
    }

    #[test]
    fn test_technician_view_states() {
        let view = TicketModule::ViewTechnical;
        assert_eq!(view.offered_states().len(), 3);
        assert!(!view.offered_states().contains(&TicketState::Terminado));

        // текущая стадия всегда видна, даже если модуль её не предлагает
        assert_eq!(
            view.selectable_states(TicketState::Terminado),
            vec![
                TicketState::Asignado,
                TicketState::EnProceso,
                TicketState::EnRevision,
                TicketState::Terminado
            ]
        );
        assert_eq!(
            TicketModule::TechnicalService.selectable_states(TicketState::Asignado).len(),
            5
        );
    }
}
