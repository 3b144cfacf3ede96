use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct UserDoc { pub user_id: String, pub full_name: String, pub mob_num: String, pub pan_num: String }

#[derive(ToSchema)]
pub struct UserListDoc { pub users: Vec<UserDoc> }

#[derive(ToSchema)]
pub struct CreateUserDoc {
    /// Non-empty after trimming
    pub full_name: String,
    /// Exactly 10 digits
    pub mob_num: String,
    /// `AAAAA9999A`
    pub pan_num: String,
}

#[derive(ToSchema)]
pub struct UpdateDataDoc {
    pub full_name: Option<String>,
    pub mob_num: Option<String>,
    pub pan_num: Option<String>,
}

#[derive(ToSchema)]
pub struct UpdateUserDoc { pub user_id: String, pub update_data: UpdateDataDoc }

#[derive(ToSchema)]
pub struct DeleteUserDoc { pub user_id: String }

#[derive(ToSchema)]
pub struct CreatedUserDoc { pub message: String, pub user_id: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ErrorDoc { pub error: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::users::create_user,
        crate::routes::users::list_users,
        crate::routes::users::get_user,
        crate::routes::users::update_user,
        crate::routes::users::delete_user,
    ),
    components(
        schemas(
            HealthResponse,
            UserDoc,
            UserListDoc,
            CreateUserDoc,
            UpdateDataDoc,
            UpdateUserDoc,
            DeleteUserDoc,
            CreatedUserDoc,
            MessageDoc,
            ErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "users")
    )
)]
pub struct ApiDoc;
