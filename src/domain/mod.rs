/*
Copyright 2024 San Francisco Compute Company

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Domain layer: entities, errors, pure parsing and the collection services

pub mod cache;
pub mod entities;
pub mod errors;
pub mod filter;
pub mod parsers;
pub mod presentation;
pub mod resolver;
pub mod services;

pub use cache::*;
pub use entities::*;
pub use errors::*;
pub use filter::*;
pub use resolver::*;
pub use services::*;
