//! Financial transactions. Independent of the other tables; any names on a
//! record are caller-captured denormalizations.

use crate::core::{Result, StoreError, ids};
use crate::model::{NewTransaction, Transaction, TransactionPatch};
use crate::store::LmsStore;

impl LmsStore {
    pub async fn list_transactions(&mut self) -> Result<Vec<Transaction>> {
        self.ensure_loaded().await?;
        let mut transactions: Vec<Transaction> = self.transactions.values().cloned().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(transactions)
    }

    pub async fn add_transaction(&mut self, new: NewTransaction) -> Result<Transaction> {
        self.ensure_loaded().await?;
        let transaction = Transaction {
            id: ids::serial_id(&self.transactions, "tx-"),
            kind: new.kind,
            student_name: new.student_name,
            student_id: new.student_id,
            course_name: new.course_name,
            course_id: new.course_id,
            instructor_name: new.instructor_name,
            instructor_id: new.instructor_id,
            amount: new.amount,
            status: new.status,
            date: new.date,
        };
        self.transactions
            .insert(transaction.id.clone(), transaction.clone());
        self.persist().await?;
        Ok(transaction)
    }

    pub async fn update_transaction(
        &mut self,
        transaction_id: &str,
        patch: TransactionPatch,
    ) -> Result<Transaction> {
        self.ensure_loaded().await?;
        let tx = self
            .transactions
            .get_mut(transaction_id)
            .ok_or_else(|| StoreError::NotFound("Transaction not found".to_string()))?;
        if let Some(kind) = patch.kind {
            tx.kind = kind;
        }
        if let Some(student_name) = patch.student_name {
            tx.student_name = Some(student_name);
        }
        if let Some(student_id) = patch.student_id {
            tx.student_id = Some(student_id);
        }
        if let Some(course_name) = patch.course_name {
            tx.course_name = Some(course_name);
        }
        if let Some(course_id) = patch.course_id {
            tx.course_id = Some(course_id);
        }
        if let Some(instructor_name) = patch.instructor_name {
            tx.instructor_name = Some(instructor_name);
        }
        if let Some(instructor_id) = patch.instructor_id {
            tx.instructor_id = Some(instructor_id);
        }
        if let Some(amount) = patch.amount {
            tx.amount = amount;
        }
        if let Some(status) = patch.status {
            tx.status = status;
        }
        if let Some(date) = patch.date {
            tx.date = date;
        }
        let updated = tx.clone();
        self.persist().await?;
        Ok(updated)
    }

    pub async fn delete_transaction(&mut self, transaction_id: &str) -> Result<()> {
        self.ensure_loaded().await?;
        if self.transactions.remove(transaction_id).is_none() {
            return Err(StoreError::NotFound("Transaction not found".to_string()));
        }
        self.persist().await?;
        Ok(())
    }
}
