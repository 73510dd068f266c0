//! Sequential effect runner
//!
//! Runs a [`DashboardSession`] against a [`Gateway`], awaiting each effect
//! and feeding its result back until the queue drains. Requests never
//! overlap here; the web UI runs effects concurrently instead.

use std::collections::VecDeque;

use crate::gateway::Gateway;
use crate::upload::PendingUpload;

use super::{DashboardSession, Effect};

pub struct SessionDriver<G> {
    gateway: G,
    session: DashboardSession,
}

impl<G: Gateway> SessionDriver<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            session: DashboardSession::new(),
        }
    }

    pub fn session(&self) -> &DashboardSession {
        &self.session
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub async fn start(&mut self) {
        let effects = self.session.start();
        self.run(effects).await;
    }

    pub fn select_file(&mut self, file: PendingUpload) {
        self.session.select_file(file);
    }

    pub async fn upload(&mut self) {
        let effects = self.session.upload();
        self.run(effects).await;
    }

    pub async fn set_method(&mut self, value: &str) {
        let effects = self.session.set_method(value);
        self.run(effects).await;
    }

    pub async fn set_age(&mut self, value: &str) {
        let effects = self.session.set_age(value);
        self.run(effects).await;
    }

    pub async fn set_period(&mut self, value: &str) {
        let effects = self.session.set_period(value);
        self.run(effects).await;
    }

    pub async fn toggle_county(&mut self, county: &str) {
        let effects = self.session.toggle_county(county);
        self.run(effects).await;
    }

    /// Execute effects in order, including any they produce.
    pub async fn run(&mut self, effects: Vec<Effect>) {
        let mut queue: VecDeque<Effect> = effects.into();

        while let Some(effect) = queue.pop_front() {
            let follow_up = match effect {
                Effect::LoadColorConfig => {
                    let result = self.gateway.color_config().await;
                    self.session.on_color_config(result);
                    Vec::new()
                }
                Effect::Upload(file) => {
                    let result = self.gateway.upload(&file).await;
                    self.session.on_upload(result)
                }
                Effect::LoadFilters => {
                    let result = self.gateway.filters().await;
                    self.session.on_filters(result)
                }
                Effect::LoadData { seq, query } => {
                    let result = self.gateway.data(&query).await;
                    self.session.on_data(seq, result);
                    Vec::new()
                }
            };
            queue.extend(follow_up);
        }
    }
}
