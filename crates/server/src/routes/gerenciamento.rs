//! Management service: students, teachers and classes. Makes no outbound calls;
//! its `GET /turmas/{id}` and `GET /professores/{id}` answer the existence
//! checks of the other services.

use axum::Router;
use models::{Class, NewClass, NewStudent, NewTeacher, Student, Teacher};
use service::crud::CrudService;

use super::crud::crud_routes;

pub const SERVICE: &str = "gerenciamento";
pub const PREFIXES: &[&str] = &["/alunos", "/professores", "/turmas"];

#[derive(Clone)]
pub struct GerenciamentoState {
    pub students: CrudService<Student>,
    pub teachers: CrudService<Teacher>,
    pub classes: CrudService<Class>,
}

pub fn build_router(state: GerenciamentoState) -> Router {
    let routes = Router::new()
        .nest("/alunos", crud_routes::<Student, NewStudent>(state.students))
        .nest("/professores", crud_routes::<Teacher, NewTeacher>(state.teachers))
        .nest("/turmas", crud_routes::<Class, NewClass>(state.classes));
    super::finish(SERVICE, PREFIXES, routes)
}
