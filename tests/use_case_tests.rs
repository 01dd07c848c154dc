use chrono::Utc;
use mockall::{mock, predicate::*};
use portfolio_api::{
    entities::{
        contact::{Contact, ContactInsert, NewContactRequest},
        project::{NewProjectRequest, Project, ProjectInsert, UpdateProjectRequest},
    },
    errors::AppError,
    repositories::{contact::ContactRepository, project::ProjectRepository},
    use_cases::{contact::ContactHandler, projects::ProjectHandler},
};

// === Mock repositories ===
mock! {
    pub ProjectRepo {}

    #[async_trait::async_trait]
    impl ProjectRepository for ProjectRepo {
        async fn get_all_projects(&self, categoria: Option<String>) -> Result<Vec<Project>, AppError>;
        async fn get_project_by_id(&self, id: i64) -> Result<Option<Project>, AppError>;
        async fn get_project_by_category_and_slug(&self, categoria: &str, slug: &str) -> Result<Option<Project>, AppError>;
        async fn create_project(&self, project: &ProjectInsert) -> Result<Project, AppError>;
        async fn update_project(&self, id: i64, update: UpdateProjectRequest) -> Result<Option<Project>, AppError>;
        async fn delete_project(&self, id: i64) -> Result<bool, AppError>;
    }
}

mock! {
    pub ContactRepo {}

    #[async_trait::async_trait]
    impl ContactRepository for ContactRepo {
        async fn create_contact(&self, contact: &ContactInsert) -> Result<i64, AppError>;
        async fn get_all_contacts(&self) -> Result<Vec<Contact>, AppError>;
        async fn get_contact_by_id(&self, id: i64) -> Result<Option<Contact>, AppError>;
        async fn delete_contact(&self, id: i64) -> Result<bool, AppError>;
    }
}

fn sample_project(id: i64) -> Project {
    Project {
        id,
        titulo: "Sample".into(),
        descripcion: "desc".into(),
        categoria: "frontend".into(),
        slug: "sample".into(),
        tecnologias: vec![],
        github_url: None,
        demo_url: None,
        orden: 1,
        images: vec![],
    }
}

fn new_project(categoria: &str) -> NewProjectRequest {
    NewProjectRequest {
        titulo: Some("Sample".into()),
        descripcion: Some("desc".into()),
        categoria: Some(categoria.into()),
        ..Default::default()
    }
}

// === Projects ===

#[tokio::test]
async fn invalid_category_never_reaches_the_store() {
    let mut repo = MockProjectRepo::new();
    repo.expect_create_project().never();

    let handler = ProjectHandler::new(repo);
    let result = handler.create_project(new_project("invalid")).await;

    match result {
        Err(AppError::ValidationError(msg)) => assert!(msg.contains("frontend, uxui, framework")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn blank_required_field_is_rejected() {
    let mut repo = MockProjectRepo::new();
    repo.expect_create_project().never();

    let handler = ProjectHandler::new(repo);
    let mut request = new_project("frontend");
    request.titulo = Some("   ".into());

    let result = handler.create_project(request).await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn padded_category_is_not_a_category() {
    let mut repo = MockProjectRepo::new();
    repo.expect_create_project().never();

    let handler = ProjectHandler::new(repo);
    let result = handler.create_project(new_project(" frontend ")).await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn create_forwards_values_untrimmed() {
    let mut repo = MockProjectRepo::new();
    repo.expect_create_project()
        .withf(|insert| insert.titulo == "  Sample  " && insert.descripcion == " desc")
        .times(1)
        .returning(|_| Ok(sample_project(1)));

    let handler = ProjectHandler::new(repo);
    let mut request = new_project("frontend");
    request.titulo = Some("  Sample  ".into());
    request.descripcion = Some(" desc".into());

    assert!(handler.create_project(request).await.is_ok());
}

#[tokio::test]
async fn valid_create_passes_defaults_to_store() {
    let mut repo = MockProjectRepo::new();
    repo.expect_create_project()
        .withf(|insert| insert.slug == "sample" && insert.orden.is_none() && insert.tecnologias.is_empty())
        .times(1)
        .returning(|_| Ok(sample_project(1)));

    let handler = ProjectHandler::new(repo);
    let project = handler.create_project(new_project("frontend")).await.unwrap();
    assert_eq!(project.id, 1);
}

#[tokio::test]
async fn missing_project_maps_to_not_found() {
    let mut repo = MockProjectRepo::new();
    repo.expect_get_project_by_id()
        .with(eq(7))
        .returning(|_| Ok(None));

    let handler = ProjectHandler::new(repo);
    let result = handler.get_project_by_id("7").await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn unparseable_id_skips_the_store() {
    let mut repo = MockProjectRepo::new();
    repo.expect_get_project_by_id().never();
    repo.expect_delete_project().never();

    let handler = ProjectHandler::new(repo);
    assert!(matches!(handler.get_project_by_id("abc").await, Err(AppError::NotFound(_))));
    assert!(matches!(handler.delete_project("abc").await, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn backend_failure_propagates_as_internal_error() {
    let mut repo = MockProjectRepo::new();
    repo.expect_get_all_projects()
        .returning(|_| Err(AppError::InternalError("disk on fire".into())));

    let handler = ProjectHandler::new(repo);
    match handler.list_projects(None).await {
        Err(AppError::InternalError(msg)) => assert_eq!(msg, "disk on fire"),
        other => panic!("expected internal error, got {:?}", other),
    }
}

#[tokio::test]
async fn blank_category_filter_means_no_filter() {
    let mut repo = MockProjectRepo::new();
    repo.expect_get_all_projects()
        .withf(|categoria| categoria.is_none())
        .times(1)
        .returning(|_| Ok(vec![]));

    let handler = ProjectHandler::new(repo);
    assert!(handler.list_projects(Some("  ")).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_with_invalid_category_is_rejected() {
    let mut repo = MockProjectRepo::new();
    repo.expect_update_project().never();

    let handler = ProjectHandler::new(repo);
    let update: UpdateProjectRequest = serde_json::from_str(r#"{"categoria": "mobile"}"#).unwrap();

    let result = handler.update_project("1", update).await;
    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn delete_of_missing_project_is_not_found() {
    let mut repo = MockProjectRepo::new();
    repo.expect_delete_project()
        .with(eq(3))
        .returning(|_| Ok(false));

    let handler = ProjectHandler::new(repo);
    assert!(matches!(handler.delete_project("3").await, Err(AppError::NotFound(_))));
}

// === Contacts ===

#[tokio::test]
async fn contact_with_bad_email_is_rejected() {
    let mut repo = MockContactRepo::new();
    repo.expect_create_contact().never();

    let handler = ContactHandler::new(repo);
    let result = handler
        .create_contact_message(NewContactRequest {
            nombre: Some("A".into()),
            email: Some("not-an-email".into()),
            mensaje: Some("hi".into()),
        })
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn contact_create_returns_stored_record() {
    let mut repo = MockContactRepo::new();
    repo.expect_create_contact()
        .times(1)
        .returning(|_| Ok(11));
    repo.expect_get_contact_by_id()
        .with(eq(11))
        .returning(|id| {
            Ok(Some(Contact {
                id,
                nombre: "A".into(),
                email: "a@b.co".into(),
                mensaje: "hi".into(),
                fecha_creacion: Utc::now(),
            }))
        });

    let handler = ContactHandler::new(repo);
    let contact = handler
        .create_contact_message(NewContactRequest {
            nombre: Some("A".into()),
            email: Some("a@b.co".into()),
            mensaje: Some("hi".into()),
        })
        .await
        .unwrap();

    assert_eq!(contact.id, 11);
}

#[tokio::test]
async fn missing_contact_fields_are_rejected() {
    let mut repo = MockContactRepo::new();
    repo.expect_create_contact().never();

    let handler = ContactHandler::new(repo);
    let result = handler
        .create_contact_message(NewContactRequest {
            nombre: Some("A".into()),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
}
