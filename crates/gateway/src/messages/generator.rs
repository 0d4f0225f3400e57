//! Generator subscribe/unsubscribe message

use crate::error::GatewayError;
use hermes_core::{DataType, GeneratorId, MarketDataGenerator, SecurityId};
use std::sync::Arc;

/// Request to start (`is_subscribe == true`) or stop a generator
///
/// The security id and data type are copied from the generator when the
/// message is built and cannot be set independently, so routing always
/// matches the embedded generator.
#[derive(Debug, Clone)]
pub struct GeneratorMessage {
    is_subscribe: bool,
    security_id: SecurityId,
    data_type: DataType,
    generator: Arc<dyn MarketDataGenerator>,
}

impl GeneratorMessage {
    /// Build a message for `generator`
    ///
    /// Fails with `InvalidArgument` when the generator has no security id.
    pub fn new(
        generator: Arc<dyn MarketDataGenerator>,
        is_subscribe: bool,
    ) -> Result<Self, GatewayError> {
        if generator.security_id().is_empty() {
            return Err(GatewayError::InvalidArgument(format!(
                "generator {} has no security id",
                generator.id()
            )));
        }

        Ok(Self {
            is_subscribe,
            security_id: generator.security_id().clone(),
            data_type: generator.data_type(),
            generator,
        })
    }

    pub fn is_subscribe(&self) -> bool {
        self.is_subscribe
    }

    pub fn security_id(&self) -> &SecurityId {
        &self.security_id
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn generator(&self) -> &Arc<dyn MarketDataGenerator> {
        &self.generator
    }

    pub fn generator_id(&self) -> GeneratorId {
        self.generator.id()
    }
}
