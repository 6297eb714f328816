//! Testing utilities for the testforge workspace
//!
//! Shared source fixtures, scenario builders and scripted model bridges.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::sync::Arc;
use testforge_generator::ModelBridge;
use testforge_types::{BridgeError, Framework, ModelId, Priority, ScenarioType, TestScenario};

/// Smallest source with a component, an endpoint and an auth risk
pub const LOGIN_FORM: &str = "function LoginForm(){ fetch('/auth/login') }";

/// Multi-component React app with routes, hooks and a payment endpoint
pub const SHOP_APP: &str = r#"
import React, { useState, useEffect } from 'react';
import axios from 'axios';
import { Route, Routes } from 'react-router-dom';

function LoginForm() {
  const [email, setEmail] = useState('');
  return <form onSubmit={() => axios.post('/auth/login', { email })} />;
}

const Cart = () => {
  const [items, setItems] = useState([]);
  useEffect(() => { fetch('/api/cart').then(r => r.json()).then(setItems); }, []);
  return <ul>{items.map(i => <li key={i.id}>{i.name}</li>)}</ul>;
};

function Checkout() {
  axios.post('/api/payment/charge', {});
  return null;
}

export default function App() {
  return (
    <Routes>
      <Route path="/login" element={<LoginForm />} />
      <Route path="/cart" element={<Cart />} />
      <Route path="/checkout" element={<Checkout />} />
    </Routes>
  );
}
"#;

pub fn scenario(id: &str, kind: ScenarioType, priority: Priority) -> TestScenario {
    TestScenario::new(id, kind, id, Framework::React).with_priority(priority)
}

/// One model-side scenario entry
pub fn scenario_entry(id: &str, kind: &str, title: &str, priority: &str) -> Value {
    json!({
        "id": id,
        "type": kind,
        "category": "functional",
        "title": title,
        "description": format!("{title} works"),
        "priority": priority,
        "confidence": 80,
        "estimatedDuration": 5,
    })
}

/// `{"scenarios": [...]}` response text
pub fn scenarios_response(entries: Vec<Value>) -> String {
    json!({ "scenarios": entries }).to_string()
}

/// Returns the same text for every prompt
#[derive(Debug, Clone)]
pub struct ScriptedBridge {
    model: ModelId,
    response: String,
}

impl ScriptedBridge {
    pub fn new(model: ModelId, response: impl Into<String>) -> Self {
        Self {
            model,
            response: response.into(),
        }
    }

    pub fn arc(model: ModelId, response: impl Into<String>) -> Arc<dyn ModelBridge> {
        Arc::new(Self::new(model, response))
    }
}

#[async_trait]
impl ModelBridge for ScriptedBridge {
    fn model(&self) -> ModelId {
        self.model.clone()
    }

    async fn invoke(&self, _prompt: &str) -> Result<String, BridgeError> {
        Ok(self.response.clone())
    }
}

/// Fails every call with the same error
#[derive(Debug, Clone)]
pub struct FailingBridge {
    model: ModelId,
    error: BridgeError,
}

impl FailingBridge {
    pub fn new(model: ModelId, error: BridgeError) -> Self {
        Self { model, error }
    }
}

#[async_trait]
impl ModelBridge for FailingBridge {
    fn model(&self) -> ModelId {
        self.model.clone()
    }

    async fn invoke(&self, _prompt: &str) -> Result<String, BridgeError> {
        Err(self.error.clone())
    }
}

/// Records prompts and answers with a fixed response
#[derive(Debug, Default)]
pub struct RecordingBridge {
    model: ModelId,
    response: String,
    prompts: Mutex<Vec<String>>,
}

impl RecordingBridge {
    pub fn new(model: ModelId, response: impl Into<String>) -> Self {
        Self {
            model,
            response: response.into(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl ModelBridge for RecordingBridge {
    fn model(&self) -> ModelId {
        self.model.clone()
    }

    async fn invoke(&self, prompt: &str) -> Result<String, BridgeError> {
        self.prompts.lock().push(prompt.to_string());
        Ok(self.response.clone())
    }
}
