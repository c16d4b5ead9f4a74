use crate::{storage::TensorStorage, tensor::get_strides_from_shape, Tensor};

impl<T, const N: usize> bincode::enc::Encode for Tensor<T, N>
where
    T: bincode::enc::Encode,
{
    fn encode<E: bincode::enc::Encoder>(
        &self,
        encoder: &mut E,
    ) -> Result<(), bincode::error::EncodeError> {
        bincode::Encode::encode(&self.shape, encoder)?;
        bincode::Encode::encode(&self.strides, encoder)?;
        bincode::Encode::encode(&self.storage.as_slice(), encoder)?;
        Ok(())
    }
}

impl<T, const N: usize, C> bincode::de::Decode<C> for Tensor<T, N>
where
    T: bincode::de::Decode<C>,
{
    fn decode<D: bincode::de::Decoder<Context = C>>(
        decoder: &mut D,
    ) -> Result<Self, bincode::error::DecodeError> {
        let shape: [usize; N] = bincode::Decode::decode(decoder)?;
        let strides: [usize; N] = bincode::Decode::decode(decoder)?;
        let data: Vec<T> = bincode::Decode::decode(decoder)?;

        if strides != get_strides_from_shape(shape) || shape.iter().product::<usize>() != data.len()
        {
            return Err(bincode::error::DecodeError::OtherString(format!(
                "Tensor layout mismatch: shape {:?}, strides {:?}, {} elements",
                shape,
                strides,
                data.len()
            )));
        }

        Ok(Self {
            shape,
            strides,
            storage: TensorStorage::from_vec(data),
        })
    }
}
