//! Registro y login de usuarios

use bcrypt::{hash, verify, DEFAULT_COST};
use sqlx::PgPool;
use validator::Validate;

use crate::dto::auth_dto::{ApiResponse, LoginRequest, LoginResponse, RegisterRequest, UserResponse};
use crate::repositories::user_repository::UserRepository;
use crate::utils::errors::AppError;
use crate::utils::jwt::{generate_token, JwtConfig};

pub struct AuthController {
    repository: UserRepository,
    jwt_config: JwtConfig,
}

impl AuthController {
    pub fn new(pool: PgPool, jwt_config: JwtConfig) -> Self {
        Self {
            repository: UserRepository::new(pool),
            jwt_config,
        }
    }

    pub async fn register(
        &self,
        request: RegisterRequest,
    ) -> Result<ApiResponse<UserResponse>, AppError> {
        request.validate().map_err(AppError::Validation)?;

        if self.repository.email_exists(&request.email).await? {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }

        let password_hash = hash(&request.password, DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Error hashing password: {}", e)))?;

        let user = self.repository.create(request.email, password_hash).await?;

        Ok(ApiResponse::success_with_message(
            UserResponse {
                id: user.id,
                email: user.email,
                created_at: user.created_at,
            },
            "User registered".to_string(),
        ))
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AppError> {
        let user = self
            .repository
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;

        let valid = verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }

        let token = generate_token(user.id, &self.jwt_config)?;

        Ok(LoginResponse::success(token, user.id.to_string()))
    }
}
