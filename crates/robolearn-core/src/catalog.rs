//! The quiz content catalog.
//!
//! A [`Catalog`] can only be obtained through [`Catalog::new`] (which checks
//! every structural invariant) or [`Catalog::builtin`], so downstream code
//! may rely on: both sections present in traversal order, no empty section,
//! unique module ids, at least two options per module and an in-range
//! correct index.

use std::collections::HashSet;
use std::sync::Arc;

use crate::error::{QuizError, Result};
use crate::model::{ModuleDefinition, Section, SectionId};

/// Ordered, validated collection of sections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    name: String,
    sections: Vec<Arc<Section>>,
}

impl Catalog {
    /// Build a catalog, rejecting data that breaks an invariant.
    pub fn new(name: impl Into<String>, mut sections: Vec<Section>) -> Result<Self> {
        sections.sort_by_key(|s| s.id);

        let ids: Vec<SectionId> = sections.iter().map(|s| s.id).collect();
        if ids != SectionId::ALL {
            return Err(QuizError::InvalidCatalog(format!(
                "expected sections {:?}, found {:?}",
                SectionId::ALL,
                ids
            )));
        }

        let mut seen = HashSet::new();
        for section in &sections {
            if section.is_empty() {
                return Err(QuizError::InvalidCatalog(format!(
                    "section {} has no modules",
                    section.id
                )));
            }
            for module in &section.modules {
                if !seen.insert(module.id.as_str()) {
                    return Err(QuizError::InvalidCatalog(format!(
                        "duplicate module id: {}",
                        module.id
                    )));
                }
                if module.options.len() < 2 {
                    return Err(QuizError::InvalidCatalog(format!(
                        "module {} needs at least 2 options",
                        module.id
                    )));
                }
                if module.correct_index >= module.options.len() {
                    return Err(QuizError::InvalidCatalog(format!(
                        "module {}: correct_index {} out of range for {} options",
                        module.id,
                        module.correct_index,
                        module.options.len()
                    )));
                }
            }
        }

        let catalog = Self {
            name: name.into(),
            sections: sections.into_iter().map(Arc::new).collect(),
        };
        tracing::debug!(
            "catalog '{}' loaded with {} modules",
            catalog.name,
            catalog.len()
        );
        Ok(catalog)
    }

    /// The shipped robotics dataset: three joints, two links.
    pub fn builtin() -> Self {
        Self {
            name: "Robotics Explorer".into(),
            sections: vec![Arc::new(joints()), Arc::new(links())],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sections in traversal order.
    pub fn sections(&self) -> &[Arc<Section>] {
        &self.sections
    }

    pub fn section(&self, id: SectionId) -> &Arc<Section> {
        // Construction guarantees one section per id, in `SectionId::ALL` order.
        match id {
            SectionId::Joints => &self.sections[0],
            SectionId::Links => &self.sections[1],
        }
    }

    /// All modules in catalog order.
    pub fn modules(&self) -> impl Iterator<Item = &ModuleDefinition> {
        self.sections.iter().flat_map(|s| s.modules.iter())
    }

    pub fn module(&self, id: &str) -> Option<&ModuleDefinition> {
        self.modules().find(|m| m.id == id)
    }

    pub fn section_of(&self, module_id: &str) -> Option<SectionId> {
        self.sections
            .iter()
            .find(|s| s.contains(module_id))
            .map(|s| s.id)
    }

    /// Total number of modules. Always greater than zero.
    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[allow(clippy::too_many_arguments)]
fn module(
    id: &str,
    title: &str,
    description: &str,
    theory: &str,
    media_ref: &str,
    question: &str,
    options: [&str; 4],
    correct_index: usize,
) -> ModuleDefinition {
    ModuleDefinition {
        id: id.into(),
        title: title.into(),
        description: description.into(),
        theory: theory.into(),
        media_ref: media_ref.into(),
        question: question.into(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_index,
    }
}

fn joints() -> Section {
    Section {
        id: SectionId::Joints,
        modules: vec![
            module(
                "prismatic",
                "Prismatic Joint",
                "A prismatic joint allows linear motion along one axis. Imagine a drawer sliding in and out or a telescopic antenna extending and retracting. This joint provides translational movement without any rotation, making it ideal for applications requiring precise linear positioning.",
                "In robotics, prismatic joints are commonly found in industrial automation systems where linear actuators move parts along assembly lines. The motion is constrained to a single axis, typically controlled by hydraulic cylinders, pneumatic actuators, or linear motors. This type of joint is essential in applications like 3D printers (Z-axis movement), robotic arms requiring reach extension, and automated manufacturing systems where precise linear positioning is crucial.",
                "https://gepettoweb.laas.fr/hpp/pinocchio/doxygen-html/prismatic_laas.gif",
                "Which of the following is an example of a prismatic joint?",
                ["Door hinge", "Sliding drawer", "Human knee", "Ball socket"],
                1,
            ),
            module(
                "revolute",
                "Revolute Joint",
                "A revolute joint enables rotational motion around a fixed axis. A good example is a door hinge or robotic elbow that can rotate but cannot translate. This is the most common type of joint in robotic systems.",
                "Revolute joints are fundamental in robotics because they mimic many natural movements found in biological systems. They consist of two links connected by a pin or shaft that allows rotation about a single axis. The range of motion can be limited by mechanical stops or controlled electronically. In robotic arms, multiple revolute joints work together to provide complex positioning capabilities. Examples include robotic shoulders, elbows, and wrists, where each joint contributes one degree of rotational freedom to the overall system.",
                "https://gepettoweb.laas.fr/hpp/pinocchio/doxygen-html/revolute_laas.gif",
                "What kind of motion does a revolute joint provide?",
                ["Rotation", "Linear translation", "3D pivoting", "Bending"],
                0,
            ),
            module(
                "spherical",
                "Spherical Joint",
                "A spherical joint allows 3D rotational motion, just like a ball-and-socket joint found in the human shoulder or hip. It allows pitch, yaw, and roll movements simultaneously, providing maximum rotational freedom.",
                "Spherical joints, also known as ball-and-socket joints, provide three degrees of rotational freedom around a single point. This makes them incredibly versatile for applications requiring complex orientation changes. In robotics, they are used in applications like robotic hands and arms where natural, fluid motion is required. The joint consists of a spherical surface (ball) that rotates within a matching curved surface (socket). While they offer great flexibility, they are more complex to control and manufacture compared to simpler joint types.",
                "https://gepettoweb.laas.fr/hpp/pinocchio/doxygen-html/spherical_laas.gif",
                "Which part of the human body best represents a spherical joint?",
                ["Elbow", "Shoulder", "Knee", "Wrist"],
                1,
            ),
        ],
    }
}

fn links() -> Section {
    Section {
        id: SectionId::Links,
        modules: vec![
            module(
                "rigid",
                "Rigid Links",
                "A rigid link does not deform under normal conditions. Most metal arms in industrial robots are rigid links. They preserve distance between joints and maintain structural integrity.",
                "Rigid links are the backbone of most robotic systems, providing structural stability and precise positioning. Made from materials like steel, aluminum, or carbon fiber, they maintain their shape under normal operating loads. In industrial robotics, rigid links ensure repeatability and accuracy in manufacturing processes. They are designed to withstand forces, torques, and vibrations without deformation. The stiffness of rigid links allows for precise control of end-effector positioning, making them ideal for applications requiring high precision such as welding, assembly, and machining operations.",
                "https://hiro-group.ronc.one/img/research/roboskin/flacco_body_after.gif",
                "What is the key feature of a rigid link?",
                [
                    "Does not bend or stretch",
                    "Can compress and expand",
                    "Made of rubber",
                    "Used in soft robots only",
                ],
                0,
            ),
            module(
                "soft",
                "Soft Links",
                "Soft links can deform, stretch, or bend, and are often found in soft robotics. These allow more flexible, adaptable movement for safe human interaction or delicate tasks.",
                "Soft links represent a revolutionary approach in robotics, inspired by biological systems like octopus tentacles and elephant trunks. Made from materials like silicone, rubber, or other elastomers, they can safely interact with humans and handle delicate objects. Soft links enable robots to navigate complex environments, squeeze through tight spaces, and adapt their shape to different tasks. They are particularly valuable in medical robotics, food handling, and service robotics where safety and adaptability are paramount. Control of soft links is more complex than rigid links, often requiring advanced algorithms and sensors.",
                "https://s.wsj.net/public/resources/images/BN-XU139_201803_E_20180308153138.gif",
                "Which field benefits most from soft links?",
                [
                    "Industrial welding",
                    "Human-robot interaction",
                    "Drone propulsion",
                    "Hard shell manufacturing",
                ],
                1,
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_option_module(id: &str, correct_index: usize) -> ModuleDefinition {
        ModuleDefinition {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            theory: String::new(),
            media_ref: String::new(),
            question: format!("{id}?"),
            options: vec!["yes".into(), "no".into()],
            correct_index,
        }
    }

    fn section(id: SectionId, modules: Vec<ModuleDefinition>) -> Section {
        Section { id, modules }
    }

    #[test]
    fn builtin_satisfies_invariants() {
        let builtin = Catalog::builtin();
        let sections = builtin.sections().iter().map(|s| (**s).clone()).collect();
        let rebuilt = Catalog::new(builtin.name(), sections).unwrap();
        assert_eq!(rebuilt, builtin);
    }

    #[test]
    fn builtin_order_and_answers() {
        let catalog = Catalog::builtin();
        let ids: Vec<&str> = catalog.modules().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["prismatic", "revolute", "spherical", "rigid", "soft"]);
        assert_eq!(catalog.section(SectionId::Joints).len(), 3);
        assert_eq!(catalog.section(SectionId::Links).len(), 2);
        assert_eq!(catalog.module("revolute").unwrap().correct_index, 0);
        assert_eq!(catalog.module("soft").unwrap().correct_option(), "Human-robot interaction");
        assert_eq!(catalog.section_of("rigid"), Some(SectionId::Links));
        assert_eq!(catalog.section_of("gear"), None);
    }

    #[test]
    fn sections_are_sorted_into_traversal_order() {
        let catalog = Catalog::new(
            "reordered",
            vec![
                section(SectionId::Links, vec![two_option_module("b", 0)]),
                section(SectionId::Joints, vec![two_option_module("a", 1)]),
            ],
        )
        .unwrap();
        assert_eq!(catalog.sections()[0].id, SectionId::Joints);
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn rejects_missing_section() {
        let err = Catalog::new(
            "joints only",
            vec![section(SectionId::Joints, vec![two_option_module("a", 0)])],
        )
        .unwrap_err();
        assert!(matches!(err, QuizError::InvalidCatalog(_)));
    }

    #[test]
    fn rejects_duplicate_ids_across_sections() {
        let err = Catalog::new(
            "dupes",
            vec![
                section(SectionId::Joints, vec![two_option_module("same", 0)]),
                section(SectionId::Links, vec![two_option_module("same", 1)]),
            ],
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate module id: same"));
    }

    #[test]
    fn rejects_out_of_range_answer() {
        let err = Catalog::new(
            "bad index",
            vec![
                section(SectionId::Joints, vec![two_option_module("a", 2)]),
                section(SectionId::Links, vec![two_option_module("b", 0)]),
            ],
        )
        .unwrap_err();
        assert!(err.to_string().contains("correct_index 2 out of range"));
    }

    #[test]
    fn rejects_empty_section() {
        let err = Catalog::new(
            "empty links",
            vec![
                section(SectionId::Joints, vec![two_option_module("a", 0)]),
                section(SectionId::Links, vec![]),
            ],
        )
        .unwrap_err();
        assert!(err.to_string().contains("Links has no modules"));
    }
}
