use bcrypt::{hash, verify};

use crate::dto::auth_dto::{
    LoginRequest, RefreshRequest, RefreshResponse, RegisterRequest, RegisterResponse, TokenResponse,
};
use crate::models::account::NewAccount;
use crate::models::client::ClientProfile;
use crate::repositories::Repositories;
use crate::state::AppState;
use crate::utils::errors::{validation_error, AppError, AppResult};
use crate::utils::jwt::{generate_token, verify_token, JwtConfig, TokenType};

pub struct AuthController {
    repos: Repositories,
    jwt: JwtConfig,
    bcrypt_cost: u32,
}

impl AuthController {
    pub fn new(state: &AppState) -> Self {
        Self {
            repos: state.repos.clone(),
            jwt: state.jwt_config(),
            bcrypt_cost: state.config.bcrypt_cost,
        }
    }

    /// Registro público: crea la cuenta y su perfil de cliente
    pub async fn register(&self, request: RegisterRequest) -> AppResult<RegisterResponse> {
        let username = request.username.trim().to_string();

        // Verificar que el usuario no exista
        if self.repos.accounts.find_by_username(&username).await?.is_some() {
            return Err(validation_error("username", "Ya existe un usuario con este nombre"));
        }

        // Hash de la contraseña
        let password_hash = hash(&request.password, self.bcrypt_cost)
            .map_err(|e| AppError::Hash(format!("Error hashing password: {}", e)))?;

        let account = NewAccount {
            username,
            email: request.email.trim().to_string(),
            password_hash,
            first_name: String::new(),
            last_name: String::new(),
            is_staff: false,
            is_superuser: false,
        };
        let profile = ClientProfile {
            company_name: request.company_name.filter(|s| !s.trim().is_empty()),
            tax_id: request.tax_id,
            phone: request.phone,
        };

        let (account, client) = self.repos.clients.register(&account, &profile).await?;
        tracing::info!("Cliente registrado: {} (cliente {})", account.username, client.client.id);

        Ok(RegisterResponse::new(&account, &client))
    }

    /// Login: devuelve el par de tokens de acceso y refresco
    pub async fn login(&self, request: LoginRequest) -> AppResult<TokenResponse> {
        let account = self
            .repos
            .accounts
            .find_by_username(request.username.trim())
            .await?
            .ok_or_else(|| AppError::Unauthorized("Credenciales inválidas".to_string()))?;

        // Verificar contraseña
        let valid = verify(&request.password, &account.password_hash)
            .map_err(|e| AppError::Hash(format!("Error verifying password: {}", e)))?;

        if !valid {
            return Err(AppError::Unauthorized("Credenciales inválidas".to_string()));
        }

        let access = generate_token(&account, TokenType::Access, &self.jwt)?;
        let refresh = generate_token(&account, TokenType::Refresh, &self.jwt)?;
        tracing::debug!("Login exitoso: {}", account.username);

        Ok(TokenResponse {
            access,
            refresh,
            username: account.username,
            is_staff: account.is_staff,
            is_superuser: account.is_superuser,
        })
    }

    /// Emitir un nuevo token de acceso a partir de uno de refresco
    pub async fn refresh(&self, request: RefreshRequest) -> AppResult<RefreshResponse> {
        let claims = verify_token(&request.refresh, TokenType::Refresh, &self.jwt)?;

        let account = self
            .repos
            .accounts
            .find_by_id(claims.account_id()?)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Cuenta no encontrada".to_string()))?;

        let access = generate_token(&account, TokenType::Access, &self.jwt)?;
        Ok(RefreshResponse { access })
    }
}
