// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Cursors executed by a remote peer.
//!
//! [`RemoteCursor`] runs nothing locally. Fetch serializes the collection
//! name and the whole pipeline, calls the peer over an [`RpcChannel`] and
//! returns the peer's result, or its error, as is. The peer side is a
//! [`RemoteService`] in front of any [`Provider`](jsql_core::Provider).

mod channel;
mod config;
mod cursor;
mod provider;
mod service;
pub mod wire;

pub use channel::{LoopbackChannel, RpcChannel};
pub use config::RemoteConfig;
pub use cursor::RemoteCursor;
pub use provider::RemoteProvider;
pub use service::RemoteService;
