use std::sync::Arc;

use crate::application::ports::ad_repository::AdRepository;
use crate::application::ports::category_repository::CategoryRepository;
use crate::application::ports::proposal_repository::ProposalRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    ad_repo: Arc<dyn AdRepository>,
    category_repo: Arc<dyn CategoryRepository>,
    proposal_repo: Arc<dyn ProposalRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl AppServices {
    pub fn new(
        ad_repo: Arc<dyn AdRepository>,
        category_repo: Arc<dyn CategoryRepository>,
        proposal_repo: Arc<dyn ProposalRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            ad_repo,
            category_repo,
            proposal_repo,
            user_repo,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn ad_repo(&self) -> Arc<dyn AdRepository> {
        self.services.ad_repo.clone()
    }

    pub fn category_repo(&self) -> Arc<dyn CategoryRepository> {
        self.services.category_repo.clone()
    }

    pub fn proposal_repo(&self) -> Arc<dyn ProposalRepository> {
        self.services.proposal_repo.clone()
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }
}
