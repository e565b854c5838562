//! Контракты клиентской части: доменные типы, правила и DTO эндпоинтов
//!
//! Без DOM и ввода-вывода, тестируется нативно.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod usecases;
