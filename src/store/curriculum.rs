//! Modules, sub-topics, and course contents.
//!
//! Plain CRUD with parent ids stamped at creation. Deleting a module or a
//! course does not sweep sub-topics or contents; the orphans are documented
//! behavior (DESIGN.md).

use crate::core::{Result, StoreError, ids};
use crate::model::{
    ContentPatch, CourseContent, CourseModule, ModulePatch, NewContent, NewModule, NewSubTopic,
    SubTopic, SubTopicPatch,
};
use crate::store::LmsStore;

impl LmsStore {
    pub async fn add_module(&mut self, course_id: &str, new: NewModule) -> Result<CourseModule> {
        self.ensure_loaded().await?;
        let module = CourseModule {
            id: ids::padded_id(&self.modules, "M", 3),
            course_id: course_id.to_string(),
            title: new.title,
            description: new.description,
            content: new.content,
        };
        self.modules.insert(module.id.clone(), module.clone());
        self.persist().await?;
        Ok(module)
    }

    pub async fn update_module(
        &mut self,
        module_id: &str,
        patch: ModulePatch,
    ) -> Result<CourseModule> {
        self.ensure_loaded().await?;
        let module = self
            .modules
            .get_mut(module_id)
            .ok_or_else(|| StoreError::NotFound("Module not found".to_string()))?;
        if let Some(title) = patch.title {
            module.title = title;
        }
        if let Some(description) = patch.description {
            module.description = description;
        }
        if let Some(content) = patch.content {
            module.content = content;
        }
        let updated = module.clone();
        self.persist().await?;
        Ok(updated)
    }

    pub async fn delete_module(&mut self, module_id: &str) -> Result<()> {
        self.ensure_loaded().await?;
        if self.modules.remove(module_id).is_none() {
            return Err(StoreError::NotFound("Module not found".to_string()));
        }
        self.persist().await?;
        Ok(())
    }

    pub async fn list_modules_for_course(&mut self, course_id: &str) -> Result<Vec<CourseModule>> {
        self.ensure_loaded().await?;
        Ok(self
            .modules
            .values()
            .filter(|m| m.course_id == course_id)
            .cloned()
            .collect())
    }

    pub async fn add_sub_topic(&mut self, module_id: &str, new: NewSubTopic) -> Result<SubTopic> {
        self.ensure_loaded().await?;
        let sub_topic = SubTopic {
            id: ids::padded_id(&self.sub_topics, "ST", 3),
            module_id: module_id.to_string(),
            title: new.title,
            description: new.description,
        };
        self.sub_topics
            .insert(sub_topic.id.clone(), sub_topic.clone());
        self.persist().await?;
        Ok(sub_topic)
    }

    pub async fn update_sub_topic(
        &mut self,
        sub_topic_id: &str,
        patch: SubTopicPatch,
    ) -> Result<SubTopic> {
        self.ensure_loaded().await?;
        let sub_topic = self
            .sub_topics
            .get_mut(sub_topic_id)
            .ok_or_else(|| StoreError::NotFound("Sub-topic not found".to_string()))?;
        if let Some(title) = patch.title {
            sub_topic.title = title;
        }
        if let Some(description) = patch.description {
            sub_topic.description = description;
        }
        let updated = sub_topic.clone();
        self.persist().await?;
        Ok(updated)
    }

    pub async fn delete_sub_topic(&mut self, sub_topic_id: &str) -> Result<()> {
        self.ensure_loaded().await?;
        if self.sub_topics.remove(sub_topic_id).is_none() {
            return Err(StoreError::NotFound("Sub-topic not found".to_string()));
        }
        self.persist().await?;
        Ok(())
    }

    pub async fn list_sub_topics_for_module(&mut self, module_id: &str) -> Result<Vec<SubTopic>> {
        self.ensure_loaded().await?;
        Ok(self
            .sub_topics
            .values()
            .filter(|st| st.module_id == module_id)
            .cloned()
            .collect())
    }

    pub async fn add_course_content(
        &mut self,
        course_id: &str,
        new: NewContent,
    ) -> Result<CourseContent> {
        self.ensure_loaded().await?;
        let content = CourseContent {
            id: ids::serial_id(&self.course_contents, "content-"),
            course_id: course_id.to_string(),
            title: new.title,
            content_type: new.content_type,
            content: new.content,
        };
        self.course_contents
            .insert(content.id.clone(), content.clone());
        self.persist().await?;
        Ok(content)
    }

    pub async fn update_course_content(
        &mut self,
        content_id: &str,
        patch: ContentPatch,
    ) -> Result<CourseContent> {
        self.ensure_loaded().await?;
        let content = self
            .course_contents
            .get_mut(content_id)
            .ok_or_else(|| StoreError::NotFound("Content not found".to_string()))?;
        if let Some(title) = patch.title {
            content.title = title;
        }
        if let Some(content_type) = patch.content_type {
            content.content_type = content_type;
        }
        if let Some(body) = patch.content {
            content.content = body;
        }
        let updated = content.clone();
        self.persist().await?;
        Ok(updated)
    }

    pub async fn delete_course_content(&mut self, content_id: &str) -> Result<()> {
        self.ensure_loaded().await?;
        if self.course_contents.remove(content_id).is_none() {
            return Err(StoreError::NotFound("Content not found".to_string()));
        }
        self.persist().await?;
        Ok(())
    }

    pub async fn list_course_content(&mut self, course_id: &str) -> Result<Vec<CourseContent>> {
        self.ensure_loaded().await?;
        Ok(self
            .course_contents
            .values()
            .filter(|c| c.course_id == course_id)
            .cloned()
            .collect())
    }
}
